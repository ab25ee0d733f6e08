use core::fmt;
use serde::Serialize;

/// Priority class of cells that carry no ward, or a ward missing from the priority table. It is
/// kept below every real tier so that "no ward" can not be confused with the lowest ward.
pub const UNZONED_PRIORITY: i32 = -1;

/// A ward label grouping cells into a named region of the floor plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Ward(pub char);

impl Ward {
    /// Creates a ward from a map character. Only ASCII letters name wards, labels are
    /// case-insensitive and stored in lowercase.
    pub fn from_char(c: char) -> Option<Ward> {
        c.is_ascii_alphabetic().then(|| Ward(c.to_ascii_lowercase()))
    }

    pub fn label(&self) -> char {
        self.0
    }

    /// Looks up the static priority class of the ward. There are five tiers, 5 being the most
    /// urgent.
    pub fn priority_class(&self) -> i32 {
        match self.0 {
            'c' | 'e' | 'o' | 'b' => 5,
            'm' | 's' => 4,
            'h' | 'p' => 3,
            'd' | 'g' => 2,
            'a' | 'i' => 1,
            _ => UNZONED_PRIORITY,
        }
    }
}

/// Priority class of a cell given its (optional) ward.
pub fn priority_class(ward: Option<Ward>) -> i32 {
    ward.map_or(UNZONED_PRIORITY, |w| w.priority_class())
}

impl fmt::Display for Ward {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_table() {
        for (label, class) in [
            ('c', 5),
            ('e', 5),
            ('o', 5),
            ('b', 5),
            ('m', 4),
            ('s', 4),
            ('h', 3),
            ('p', 3),
            ('d', 2),
            ('g', 2),
            ('a', 1),
            ('i', 1),
        ] {
            assert_eq!(Ward(label).priority_class(), class, "ward {label}");
        }
    }

    #[test]
    fn unknown_and_missing_wards_rank_lowest() {
        assert_eq!(Ward('z').priority_class(), UNZONED_PRIORITY);
        assert_eq!(priority_class(None), UNZONED_PRIORITY);
        assert!(UNZONED_PRIORITY < Ward('a').priority_class());
    }

    #[test]
    fn from_char() {
        assert_eq!(Ward::from_char('M'), Some(Ward('m')));
        assert_eq!(Ward::from_char('#'), None);
        assert_eq!(Ward::from_char('.'), None);
    }
}
