mod catalog;
mod client;
mod helpers;
mod refresh;
mod session;
