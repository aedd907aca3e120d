//! End-to-end tests of the scan engine against stub TLS endpoints on loopback.
#![cfg(test)]

mod probe;
mod scan;
mod support;
