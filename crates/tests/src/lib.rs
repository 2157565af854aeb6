#[cfg(test)]
mod common;

#[cfg(test)]
mod application_list_tests;

#[cfg(test)]
mod record_list_tests;

#[cfg(test)]
mod record_get_tests;

#[cfg(test)]
mod statistics_tests;

#[cfg(test)]
mod command_tests;

#[cfg(test)]
mod session_tests;

#[cfg(test)]
mod unified_search_tests;

#[cfg(test)]
mod health_tests;

#[cfg(test)]
mod rate_limit_tests;
