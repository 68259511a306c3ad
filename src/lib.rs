pub mod chatbot;
pub mod config;
