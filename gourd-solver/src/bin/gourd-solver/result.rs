use thiserror::Error;

use gourd_solver::ModelError;

pub(crate) type GourdResult<T> = Result<T, GourdError>;

#[derive(Error, Debug)]
pub(crate) enum GourdError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The model could not be built, more details: {0}")]
    InvalidModel(#[from] ModelError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
