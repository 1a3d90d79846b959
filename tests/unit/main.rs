mod test_auth;
mod test_config;
mod test_request;
mod test_storage;
