mod commands;
mod output;
