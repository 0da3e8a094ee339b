pub mod arrival;
pub mod context;
pub mod examination;
pub mod registration;
pub mod sign_in_triage;
pub mod trauma;
pub mod treatment;
