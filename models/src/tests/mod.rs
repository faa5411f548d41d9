mod coerce;
mod connection;
mod entities;
