pub mod request_facts;
pub mod trace_ctx;
