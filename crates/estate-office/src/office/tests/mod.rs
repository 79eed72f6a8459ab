mod common;
mod router;
mod service;
