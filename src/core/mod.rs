// Core helpers: presence checks, list intersection, file and resource filtering, errors.
pub mod error;
pub mod files;
pub mod format;
pub mod lists;
pub mod presence;
pub mod resource;
