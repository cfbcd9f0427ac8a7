use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

/// Where a descriptor comes from: an http(s) URL or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(Url),
    File(PathBuf),
}

impl FromStr for Source {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Source::Url(url)),
            Ok(url) if url.scheme() == "file" => Ok(Source::File(
                url.to_file_path().unwrap_or_else(|_| PathBuf::from(url.path())),
            )),
            _ => Ok(Source::File(PathBuf::from(s))),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_urls_are_remote() {
        let source: Source = "https://example.org/cov/site.json".parse().unwrap();
        assert!(matches!(source, Source::Url(ref u) if u.host_str() == Some("example.org")));
    }

    #[test]
    fn paths_are_local() {
        let source: Source = "out/site.json".parse().unwrap();
        assert_eq!(source, Source::File(PathBuf::from("out/site.json")));
    }

    #[test]
    fn file_urls_become_paths() {
        let source: Source = "file:///tmp/site.json".parse().unwrap();
        assert_eq!(source, Source::File(PathBuf::from("/tmp/site.json")));
    }
}
