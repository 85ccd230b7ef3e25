use std::net::IpAddr;

use reqwest::ClientBuilder;

fn has_proxy_env() -> bool {
    [
        "HTTPS_PROXY",
        "https_proxy",
        "HTTP_PROXY",
        "http_proxy",
        "ALL_PROXY",
        "all_proxy",
    ]
    .iter()
    .any(|k| std::env::var(k).is_ok_and(|v| !v.trim().is_empty()))
}

// Loopback upstreams (local mocks, sidecar relays) must never be sent through a proxy.
fn should_bypass_proxy_impl(url: &str, proxy_env_present: bool) -> bool {
    if !proxy_env_present {
        return false;
    }

    let Ok(u) = reqwest::Url::parse(url) else {
        return false;
    };
    let Some(host) = u.host_str() else {
        return false;
    };

    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .is_ok_and(|ip| ip.is_loopback())
}

pub fn maybe_disable_proxy(builder: ClientBuilder, url: &str) -> ClientBuilder {
    if should_bypass_proxy_impl(url, has_proxy_env()) {
        builder.no_proxy()
    } else {
        builder
    }
}

/// Client without a request timeout: upstream calls run until they resolve or fail.
pub fn client_for_url(url: &str) -> Result<reqwest::Client, reqwest::Error> {
    let builder = reqwest::Client::builder();
    maybe_disable_proxy(builder, url).build()
}

#[cfg(test)]
mod tests {
    use super::should_bypass_proxy_impl;

    #[test]
    fn bypass_proxy_for_loopback_when_proxy_env_present() {
        assert!(should_bypass_proxy_impl(
            "http://127.0.0.1:8081/v1/chat/completions",
            true
        ));
        assert!(should_bypass_proxy_impl("http://localhost:9000/v1", true));
        assert!(should_bypass_proxy_impl("http://[::1]:9000/v1", true));
    }

    #[test]
    fn keep_proxy_for_remote_hosts() {
        assert!(!should_bypass_proxy_impl(
            "https://api.groq.com/openai/v1/chat/completions",
            true
        ));
        assert!(!should_bypass_proxy_impl("http://10.0.0.5/v1", true));
    }

    #[test]
    fn do_not_bypass_without_proxy_env() {
        assert!(!should_bypass_proxy_impl("http://127.0.0.1:8081/v1", false));
    }
}
