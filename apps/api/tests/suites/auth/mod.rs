mod google_login;
mod verifier_http;
