//! Static skill taxonomy: category name → lowercase keywords.

use std::collections::BTreeSet;

pub struct Category {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

pub const TAXONOMY: &[Category] = &[
    Category {
        name: "python",
        keywords: &[
            "python",
            "django",
            "flask",
            "pandas",
            "numpy",
            "scikit-learn",
            "sklearn",
        ],
    },
    Category {
        name: "javascript",
        keywords: &[
            "javascript",
            "react",
            "angular",
            "vue",
            "nodejs",
            "express",
            "next.js",
            "typescript",
        ],
    },
    Category {
        name: "web_dev",
        keywords: &["html", "css", "tailwind", "bootstrap", "responsive design"],
    },
    Category {
        name: "data_science",
        keywords: &[
            "data science",
            "machine learning",
            "ml",
            "deep learning",
            "pytorch",
            "tensorflow",
            "data analysis",
        ],
    },
    Category {
        name: "database",
        keywords: &["sql", "nosql", "mongodb", "postgresql", "mysql", "firebase"],
    },
    Category {
        name: "cloud",
        keywords: &["aws", "azure", "gcp", "docker", "kubernetes"],
    },
    Category {
        name: "mobile",
        keywords: &["flutter", "react native", "ios", "android", "swift"],
    },
    Category {
        name: "design",
        keywords: &[
            "figma",
            "sketch",
            "adobe xd",
            "ui/ux",
            "photoshop",
            "illustrator",
        ],
    },
];

/// Every keyword in taxonomy order. A keyword may appear in more than one category.
pub fn keywords() -> impl Iterator<Item = &'static str> {
    TAXONOMY.iter().flat_map(|c| c.keywords.iter().copied())
}

/// Names of the categories with at least one keyword in `skills`.
pub fn categories_of(skills: &BTreeSet<String>) -> Vec<&'static str> {
    TAXONOMY
        .iter()
        .filter(|c| c.keywords.iter().any(|k| skills.contains(*k)))
        .map(|c| c.name)
        .collect()
}
