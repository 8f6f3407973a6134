use std::fmt;
use std::str::FromStr;

/// 1-based recency index into the archive catalog; 1 is the newest archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rank(usize);

impl Rank {
    pub const MOST_RECENT: Rank = Rank(1);

    pub fn new(value: usize) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Rank(value))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::MOST_RECENT
    }
}

impl FromStr for Rank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("'{}' is not a valid backup number", s))?;
        Rank::new(value).ok_or_else(|| "backup number must be 1 or greater".to_string())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_parses_positive_numbers() {
        assert_eq!("1".parse::<Rank>().unwrap(), Rank::MOST_RECENT);
        assert_eq!("3".parse::<Rank>().unwrap().get(), 3);
    }

    #[test]
    fn rank_rejects_zero_and_negatives() {
        assert!("0".parse::<Rank>().is_err());
        assert!("-1".parse::<Rank>().is_err());
        assert!("latest".parse::<Rank>().is_err());
    }
}
