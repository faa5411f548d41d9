mod daemon;
mod error;
mod session;
