pub mod config;
mod http;
pub mod openai_client;
pub mod pinecone_client;
