use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PermitError {
    #[error("required field `{0}` is missing or blank")]
    /// The record is missing a field the document cannot be issued without
    MissingField(&'static str),

    #[error(transparent)]
    /// The record could not be deserialized
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    /// An I/O error occurred while writing the output
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse a supplied font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode the logo
    Image(#[from] image::ImageError),

    #[error("page is missing from the document")]
    /// The page order refers to a page that is not in the document
    PageMissing,
}
