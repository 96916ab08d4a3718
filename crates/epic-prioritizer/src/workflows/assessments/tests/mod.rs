mod common;
mod corroboration;
mod service;
