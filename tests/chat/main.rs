mod backend_stub;
mod e2e_tests;
