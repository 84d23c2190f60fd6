pub mod api_errors;
pub mod flutterwave;
pub mod nowpayments;
pub mod paystack;
pub mod stripe;
