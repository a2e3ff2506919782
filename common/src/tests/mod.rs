mod access_token;
mod error_location;
mod http_status;
