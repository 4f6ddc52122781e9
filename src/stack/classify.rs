//! Keyword-based category inference for package names.
//!
//! Rules are checked in declaration order and the first rule with a keyword
//! contained in the lower-cased name wins, so a name that matches several rules
//! resolves Frontend, then Backend, then Database. Anything else is Runtime.

use super::types::Category;

struct CategoryRule {
    category: Category,
    keywords: &'static [&'static str],
}

const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Frontend,
        keywords: &[
            "react",
            "vue",
            "angular",
            "svelte",
            "next",
            "nuxt",
            "tailwind",
            "bootstrap",
            "framer",
            "three",
            "vite",
            "webpack",
            "sass",
            "less",
            "styled",
            "typescript",
        ],
    },
    CategoryRule {
        category: Category::Backend,
        keywords: &[
            "express",
            "nest",
            "koa",
            "fastify",
            "socket",
            "cors",
            "body-parser",
            "axios",
            "mongoose",
            "sequelize",
            "prisma",
            "node",
        ],
    },
    CategoryRule {
        category: Category::Database,
        keywords: &[
            "mongo", "mysql", "pg", "postgres", "redis", "sqlite", "mariadb", "firebase",
        ],
    },
];

/// Guesses the category of a technology from its name. Total over all inputs.
pub fn classify(name: &str) -> Category {
    let lower = name.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map(|rule| rule.category)
        .unwrap_or(Category::Runtime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        empty = { "", Category::Runtime },
        react_dom = { "React-DOM", Category::Frontend },
        next = { "next", Category::Frontend },
        scoped_types = { "@types/react", Category::Frontend },
        typescript = { "TypeScript", Category::Frontend },
        express = { "express", Category::Backend },
        socket_io = { "socket.io", Category::Backend },
        node_fetch = { "node-fetch", Category::Backend },
        pg = { "pg", Category::Database },
        ioredis = { "ioredis", Category::Database },
        firebase_admin = { "firebase-admin", Category::Database },
        lodash = { "lodash", Category::Runtime },
        docker = { "Docker", Category::Runtime },
    )]
    fn test_classify(name: &str, expected: Category) {
        assert_eq!(classify(name), expected);
    }

    #[test]
    fn test_frontend_wins_over_database() {
        assert_eq!(classify("react-redis-adapter"), Category::Frontend);
    }

    #[test]
    fn test_backend_wins_over_database() {
        // "mongoose" is a Backend keyword and also contains "mongo"
        assert_eq!(classify("mongoose"), Category::Backend);
        assert_eq!(classify("mongodb"), Category::Database);
    }

    #[test]
    fn test_substring_match_is_loose() {
        // "pg" hides inside unrelated names; that is how the rule set behaves
        assert_eq!(classify("upgrade-helper"), Category::Database);
        assert_eq!(classify("nextra"), Category::Frontend);
    }
}
