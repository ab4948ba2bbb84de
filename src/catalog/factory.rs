use crate::catalog::domain::service::Library;
use crate::core::domain::Configuration;

pub fn create_library(config: &Configuration) -> Library {
    Library::new(config)
}
