// File: errors.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fmt;

/// Failure to obtain the candidate list. Always fatal at startup.
#[derive(Debug)]
pub enum InputError {
    Open(String, std::io::Error),
    Read(std::io::Error),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(path, e) => write!(f, "Could not open specified file {}: {}", path, e),
            Self::Read(e) => write!(f, "Could not read candidate list: {}", e),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open(_, e) => Some(e),
            Self::Read(e) => Some(e),
        }
    }
}

/// Why a single fetch produced no body. Never fatal; the caller narrates it
/// and scores the fetch as empty.
#[derive(Debug)]
pub enum ProbeError {
    InvalidUrl(String),
    Client(reqwest::Error),
    Connect(reqwest::Error),
    Timeout,
    Request(reqwest::Error),
    Body(reqwest::Error),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(msg) => write!(f, "Invalid target URL: {}", msg),
            Self::Client(e) => write!(f, "Failed to build HTTP client: {}", e),
            Self::Connect(e) => write!(f, "Connection failed: {}", e),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Request(e) => write!(f, "Request failed: {}", e),
            Self::Body(e) => write!(f, "Failed to read body: {}", e),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidUrl(_) => None,
            Self::Client(e) => Some(e),
            Self::Connect(e) => Some(e),
            Self::Timeout => None,
            Self::Request(e) => Some(e),
            Self::Body(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect(error)
        } else if error.is_body() || error.is_decode() {
            Self::Body(error)
        } else if error.is_builder() {
            Self::Client(error)
        } else {
            Self::Request(error)
        }
    }
}
