pub mod userinfo_response;
