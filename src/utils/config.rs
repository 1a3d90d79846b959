/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Gets a string environment variable, treating blank values as unset
///
/// Runtime inputs such as the API base are injected by the hosting
/// environment, which sometimes exports them empty.
pub fn get_env_trimmed(env_var: &str) -> Option<String> {
    env::var(env_var)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Gets and parses an environment variable
///
/// Blank values count as unset. A value that does not parse is logged and
/// ignored.
pub fn get_env_or_none<T: FromStr>(env_var: &str) -> Option<T> {
    let raw = get_env_trimmed(env_var)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: cannot parse {:?}", env_var, raw);
            None
        }
    }
}
