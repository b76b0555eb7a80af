//! Static route lines of the form `<ipv4>/<prefix> via <ipv4>`.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use super::ipv4::parse_ipv4;
use super::network::NetworkDescriptor;
use super::NetError;

const VIA: &str = " via ";

/// One static route: traffic for `destination` is sent to `gateway`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    pub destination: NetworkDescriptor,
    pub gateway: Ipv4Addr,
}

impl FromStr for Route {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_route_line(s, 1)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{VIA}{}", self.destination, self.gateway)
    }
}

/// Parses newline-separated routes.  A single trailing newline is allowed;
/// blank lines are not.
///
/// # Errors
///
/// Returns [`NetError::InvalidRoute`] for the first line that does not parse,
/// including when `input` is empty.
pub fn parse_route_list(input: &str) -> Result<Vec<Route>, NetError> {
    let body = input.strip_suffix('\n').unwrap_or(input);
    body.split('\n')
        .enumerate()
        .map(|(index, line)| parse_route_line(line, index + 1))
        .collect()
}

/// Returns `true` if `input` is exactly one route.
pub fn is_ipv4_route(input: &str) -> bool {
    input.parse::<Route>().is_ok()
}

/// Returns `true` if `input` is one or more routes separated by `\n`.
pub fn is_ipv4_route_list(input: &str) -> bool {
    parse_route_list(input).is_ok()
}

fn parse_route_line(line: &str, number: usize) -> Result<Route, NetError> {
    let invalid = || NetError::InvalidRoute {
        line: number,
        input: line.to_string(),
    };

    let (destination, gateway) = line.split_once(VIA).ok_or_else(invalid)?;
    let destination = destination
        .parse::<NetworkDescriptor>()
        .map_err(|_| invalid())?;
    let gateway = parse_ipv4(gateway).map_err(|_| invalid())?;
    Ok(Route {
        destination,
        gateway,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ipv4_route_accepts_canonical_line() {
        assert!(is_ipv4_route("10.0.0.0/8 via 192.168.1.1"));
        assert!(is_ipv4_route("0.0.0.0/0 via 172.16.0.1"));
    }

    #[test]
    fn test_is_ipv4_route_rejects_spacing_and_missing_parts() {
        assert!(!is_ipv4_route("10.0.0.0/8  via 192.168.1.1"));
        assert!(!is_ipv4_route("10.0.0.0/8 via"));
        assert!(!is_ipv4_route("10.0.0.0 via 192.168.1.1"));
        assert!(!is_ipv4_route("10.0.0.0/8 via 192.168.1.1\n"));
        assert!(!is_ipv4_route("10.0.0.0/8 via 192.168.1.1 via 10.0.0.1"));
    }

    #[test]
    fn test_route_display_round_trips_text() {
        let text = "192.168.128.0/22 via 10.1.1.254";
        let route: Route = text.parse().unwrap();
        assert_eq!(route.to_string(), text);
        assert_eq!(route.gateway, Ipv4Addr::new(10, 1, 1, 254));
    }

    #[test]
    fn test_is_ipv4_route_list_single_and_multiple_lines() {
        assert!(is_ipv4_route_list("10.0.0.0/8 via 192.168.1.1"));
        assert!(is_ipv4_route_list(
            "10.0.0.0/8 via 192.168.1.1\n172.16.0.0/12 via 192.168.1.2"
        ));
    }

    #[test]
    fn test_is_ipv4_route_list_allows_one_trailing_newline() {
        assert!(is_ipv4_route_list("10.0.0.0/8 via 192.168.1.1\n"));
        assert!(!is_ipv4_route_list("10.0.0.0/8 via 192.168.1.1\n\n"));
    }

    #[test]
    fn test_is_ipv4_route_list_rejects_empty_and_blank_lines() {
        assert!(!is_ipv4_route_list(""));
        assert!(!is_ipv4_route_list("\n"));
        assert!(!is_ipv4_route_list(
            "10.0.0.0/8 via 192.168.1.1\n\n172.16.0.0/12 via 192.168.1.2"
        ));
    }

    #[test]
    fn test_parse_route_list_reports_failing_line_number() {
        let err = parse_route_list("10.0.0.0/8 via 192.168.1.1\nbogus").unwrap_err();
        assert_eq!(
            err,
            NetError::InvalidRoute {
                line: 2,
                input: "bogus".to_string()
            }
        );
    }
}
