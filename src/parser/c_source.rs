//! Pulls the map fragments out of generated C text.
//!
//! This is pattern matching on text, not a C parser. Comments are not
//! understood and an initializer body ends at the first `}`: nested braces
//! inside a body cut it short. Generated text is expected to use flat
//! (brace-elided) initializers, which is what `writer::c` produces.
//
//  Recognised fragments:
//
//      #define MAP_WIDTH  <int>
//      #define MAP_HEIGHT <int>
//      int   map[MAP_HEIGHT][MAP_WIDTH] = { … };
//      Enemy enemies[MAX_ENEMIES]       = { … };

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

pub(crate) static WIDTH_DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(#define[ \t]+MAP_WIDTH[ \t]+)(\d+)\b").expect("valid regex")
});

pub(crate) static HEIGHT_DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(#define[ \t]+MAP_HEIGHT[ \t]+)(\d+)\b").expect("valid regex")
});

/// Whole `int map[…][…] = { … };` statement, body in group 1.
pub(crate) static MAP_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bint\s+map\s*\[\s*MAP_HEIGHT\s*\]\s*\[\s*MAP_WIDTH\s*\]\s*=\s*\{([^}]*)\}\s*;",
    )
    .expect("valid regex")
});

/// Whole `Enemy enemies[…] = { … };` statement, body in group 1.
pub(crate) static ENEMY_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bEnemy\s+enemies\s*\[\s*MAX_ENEMIES\s*\]\s*=\s*\{([^}]*)\}\s*;")
        .expect("valid regex")
});

/// Start of an enemies initializer, whatever its body looks like.
pub(crate) static ENEMY_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bEnemy\s+enemies\s*\[\s*MAX_ENEMIES\s*\]\s*=\s*\{").expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Everything found in one block of generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extracted<'a> {
    pub dimensions: Option<Dimensions>,
    pub map_body: Option<&'a str>,
    pub enemy_body: Option<&'a str>,
}

pub fn extract(text: &str) -> Extracted<'_> {
    let found = Extracted {
        dimensions: extract_dimensions(text),
        map_body: extract_map_body(text),
        enemy_body: extract_enemy_body(text),
    };
    tracing::debug!(
        "extracted dimensions={:?} map={} enemies={}",
        found.dimensions,
        found.map_body.is_some(),
        found.enemy_body.is_some()
    );
    found
}

/// Both `MAP_WIDTH` and `MAP_HEIGHT`, or nothing.
pub fn extract_dimensions(text: &str) -> Option<Dimensions> {
    let width = define_value(&WIDTH_DEFINE, text)?;
    let height = define_value(&HEIGHT_DEFINE, text)?;
    Some(Dimensions { width, height })
}

fn define_value(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text).and_then(|caps| caps[2].parse().ok())
}

/// Raw text between the braces of the map initializer, trimmed.
pub fn extract_map_body(text: &str) -> Option<&str> {
    array_body(&MAP_ARRAY, text)
}

/// Raw text between the braces of the enemies initializer, trimmed.
///
/// `None` is an ordinary outcome: a map may define no enemies.
pub fn extract_enemy_body(text: &str) -> Option<&str> {
    array_body(&ENEMY_ARRAY, text)
}

fn array_body<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    let body = re.captures(text)?.get(1)?.as_str().trim();
    (!body.is_empty()).then_some(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = "\
#define MAP_WIDTH 5
#define MAP_HEIGHT 4

int map[MAP_HEIGHT][MAP_WIDTH] = {
    1,1,1,1,1,
    1,0,2,0,1,
    1,0,0,0,1,
    1,1,1,1,1
};

Enemy enemies[MAX_ENEMIES] = {
    [0].x = 1.50f, [0].y = 2.50f, [0].active = 1,
};
";

    #[test]
    fn test_extract_all_fragments() {
        let found = extract(GENERATED);
        assert_eq!(
            found.dimensions,
            Some(Dimensions {
                width: 5,
                height: 4
            })
        );
        assert_eq!(
            found.map_body,
            Some("1,1,1,1,1,\n    1,0,2,0,1,\n    1,0,0,0,1,\n    1,1,1,1,1")
        );
        assert_eq!(
            found.enemy_body,
            Some("[0].x = 1.50f, [0].y = 2.50f, [0].active = 1,")
        );
    }

    #[test]
    fn test_dimensions_are_both_or_neither() {
        assert_eq!(extract_dimensions("#define MAP_WIDTH 10\n"), None);
        assert_eq!(extract_dimensions("#define MAP_HEIGHT 7\n"), None);
        assert_eq!(extract_dimensions("nothing here"), None);
        assert_eq!(
            extract_dimensions("#define MAP_HEIGHT 7\n#define  MAP_WIDTH\t10\n"),
            Some(Dimensions {
                width: 10,
                height: 7
            })
        );
    }

    #[test]
    fn test_dimension_value_must_fit() {
        let text = "#define MAP_WIDTH 99999999999\n#define MAP_HEIGHT 7\n";
        assert_eq!(extract_dimensions(text), None);
    }

    #[test]
    fn test_whitespace_between_tokens() {
        let text = "int   map [ MAP_HEIGHT ]\n[MAP_WIDTH]\n=\n{ 1, 1,\n1, 1 }\n ;";
        assert_eq!(extract_map_body(text), Some("1, 1,\n1, 1"));
    }

    #[test]
    fn test_absent_fragments() {
        assert_eq!(extract_map_body("extern int map[MAP_HEIGHT][MAP_WIDTH];"), None);
        assert_eq!(extract_enemy_body("extern Enemy enemies[MAX_ENEMIES];"), None);
        assert_eq!(extract_enemy_body("Enemy enemies[MAX_ENEMIES] = { };"), None);
    }

    #[test]
    fn test_nested_braces_stop_at_first_close() {
        // rows in braces: the body runs into `},` and never reaches `};`
        let nested = "int map[MAP_HEIGHT][MAP_WIDTH] = {\n{1,1},\n{1,1}\n};";
        assert_eq!(extract_map_body(nested), None);

        // a single inner brace pair ending right before `;` is cut at the first `}`
        let inner = "Enemy enemies[MAX_ENEMIES] = { 1.0f, 2.0f, {0} };";
        assert_eq!(extract_enemy_body(inner), None);
        let inner_last = "Enemy enemies[MAX_ENEMIES] = { 1.0f, {0};";
        assert_eq!(extract_enemy_body(inner_last), Some("1.0f, {0"));
    }

    #[test]
    fn test_dimensions_display() {
        let d = Dimensions {
            width: 20,
            height: 12,
        };
        assert_eq!(d.to_string(), "20x12");
    }
}
