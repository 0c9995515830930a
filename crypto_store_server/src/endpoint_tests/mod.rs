mod checkout;
mod dashboard;
mod products;
mod webhook;
