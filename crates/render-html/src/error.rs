use thiserror::Error;

#[derive(Error, Debug)]
pub enum HtmlError {
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("Template rendering error: {0}")]
    Render(#[from] handlebars::RenderError),
    #[error("Failed to encode edit control: {0}")]
    Json(#[from] serde_json::Error),
}
