mod common;

mod presentation;
mod window;
