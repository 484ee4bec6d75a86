// File: input.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::errors::InputError;
use std::fs::File;
use std::io::{self, Read};
use std::net::IpAddr;

/// Reads the whole candidate list from `path`, or from stdin when `None`.
pub fn read_source(path: Option<&str>) -> Result<String, InputError> {
    let mut raw = Vec::new();
    match path {
        Some(path) if !path.is_empty() => {
            let mut file = File::open(path).map_err(|e| InputError::Open(path.to_string(), e))?;
            file.read_to_end(&mut raw).map_err(InputError::Read)?;
        }
        _ => {
            io::stdin().lock().read_to_end(&mut raw).map_err(InputError::Read)?;
        }
    }
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Splits raw input into entries, normalising `\r\n` line endings.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.replace("\r\n", "\n")
        .split('\n')
        .map(|line| line.to_string())
        .collect()
}

pub fn parse_candidate(entry: &str) -> Option<IpAddr> {
    entry.trim().parse().ok()
}

/// Keeps only entries that parse as an IPv4 or IPv6 address, in input order.
pub fn parse_candidates<S: AsRef<str>>(entries: &[S]) -> Vec<IpAddr> {
    entries
        .iter()
        .filter_map(|entry| parse_candidate(entry.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::{Ipv4Addr, Ipv6Addr};
    use tempfile::NamedTempFile;

    #[test]
    fn test_split_lines_normalises_crlf() {
        let lines = split_lines("10.0.0.1\r\n10.0.0.2\n10.0.0.3");
        assert_eq!(lines, vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
    }

    #[test]
    fn test_parse_candidates_drops_garbage() {
        let entries = vec![
            "192.0.2.1",
            "not-an-ip",
            "",
            "2001:db8::1",
            "300.1.1.1",
            "  198.51.100.7  ",
            "example.org",
            "::1",
        ];
        let candidates = parse_candidates(&entries);
        assert_eq!(
            candidates,
            vec![
                IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)),
                IpAddr::V6("2001:db8::1".parse::<Ipv6Addr>().unwrap()),
                IpAddr::V4(Ipv4Addr::new(198, 51, 100, 7)),
                IpAddr::V6(Ipv6Addr::LOCALHOST),
            ]
        );
    }

    #[test]
    fn test_parse_candidates_empty() {
        let entries: Vec<String> = split_lines("");
        assert!(parse_candidates(&entries).is_empty());
    }

    #[test]
    fn test_read_source_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "192.0.2.1\r\n192.0.2.2\r\n").unwrap();
        let raw = read_source(Some(file.path().to_str().unwrap())).unwrap();
        let candidates = parse_candidates(&split_lines(&raw));
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_read_source_missing_file() {
        let result = read_source(Some("/nonexistent/curryfinder/ips.txt"));
        assert!(matches!(result, Err(InputError::Open(_, _))));
    }
}
