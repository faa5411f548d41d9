mod bencode;
mod config;
mod support;
