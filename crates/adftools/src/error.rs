#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("No input provided on stdin or as a file argument")]
    EmptyInput,

    #[error("Expected an ADF document or a JSON string, got {0}")]
    UnsupportedInput(String),
}
