use crate::error::PanelError;

pub type PanelResult<T> = Result<T, PanelError>;
