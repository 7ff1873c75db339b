//! services/api/src/bin/openapi.rs
//!
//! Dumps the Momo REST API document to `openapi.json` (or the path given as the
//! first argument) so the web client can generate its types without a running server.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

const DEFAULT_PATH: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_PATH.to_string());
    let document = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(&path, document)?;
    println!("Wrote the Momo API document to {path}");
    Ok(())
}
