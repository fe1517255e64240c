use crate::error::{GlossaryError, Result};
use crate::rpc::service::GlossaryService;
use crate::rpc::types::JsonRpcResponse;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Newline-delimited JSON-RPC over stdin/stdout. Logs go to stderr.
pub struct StdioServer {
    service: GlossaryService,
}

impl StdioServer {
    pub fn new(service: GlossaryService) -> Self {
        Self { service }
    }

    /// Serve stdin until EOF
    pub async fn run(&self) -> Result<()> {
        log::info!(
            "Glossary stdio server v{} starting",
            env!("CARGO_PKG_VERSION")
        );
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await?;
        log::info!("Glossary stdio server shutting down");
        Ok(())
    }

    /// Serve any line-oriented reader/writer pair until the reader hits EOF
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await.map_err(|e| {
                GlossaryError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to read request: {}", e),
                ))
            })?;

            // EOF - client disconnected
            if bytes_read == 0 {
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(response) = self.service.process_line(trimmed) {
                send_response(&mut writer, &response).await?;
            }
        }

        Ok(())
    }
}

/// Write one JSON-RPC response followed by a newline
async fn send_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &JsonRpcResponse) -> Result<()> {
    let json = serde_json::to_string(response)
        .map_err(|e| GlossaryError::Protocol(format!("JSON serialization error: {}", e)))?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphEngine;
    use serde_json::Value;
    use std::sync::Arc;

    fn server() -> StdioServer {
        let mut builder = GraphEngine::builder();
        builder
            .add_term("A", "defA")
            .add_term("B", "defB")
            .add_relation("A", "B", "uses");
        StdioServer::new(GlossaryService::new(Arc::new(builder.build())))
    }

    #[tokio::test]
    async fn test_serve_lines() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"GetTerm","params":{"term_name":"A"}}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"GetAllTerms"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"FindPath","params":{"source_term":"B","target_term":"A"}}"#,
            "\n",
        );
        let mut output = Vec::new();

        server().serve(input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let responses: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        // The notification produced nothing
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["result"]["term"]["definition"], "defA");
        assert_eq!(responses[1]["id"], 2);
        assert_eq!(responses[1]["result"]["path"], serde_json::json!(["B", "A"]));
    }

    #[tokio::test]
    async fn test_serve_parse_error_continues() {
        let input = "garbage\n{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"GetAllTerms\"}\n";
        let mut output = Vec::new();

        server().serve(input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let responses: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert_eq!(responses[1]["result"]["total_count"], 2);
    }

    #[tokio::test]
    async fn test_serve_null_id_and_invalid_request() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":null,"method":"GetAllTerms"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":4}"#,
            "\n",
        );
        let mut output = Vec::new();

        server().serve(input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let responses: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[0]["result"]["total_count"], 2);
        assert_eq!(responses[1]["id"], 4);
        assert_eq!(responses[1]["error"]["code"], -32600);
    }
}
