//! Client-side search over container and image lists

use crate::types::{ContainerDetail, ImageSummary};

/// A record that can be matched against a search term
pub trait Searchable {
    /// `term` is non-empty and already lower-cased
    fn matches(&self, term: &str) -> bool;
}

impl Searchable for ContainerDetail {
    fn matches(&self, term: &str) -> bool {
        contains_lower(self.display_name(), term) || contains_lower(self.image(), term)
    }
}

impl Searchable for ImageSummary {
    fn matches(&self, term: &str) -> bool {
        match self.repo_and_tag() {
            Some((repository, tag)) => contains_lower(repository, term) || contains_lower(tag, term),
            None => false,
        }
    }
}

fn contains_lower(field: &str, term: &str) -> bool {
    field.to_lowercase().contains(term)
}

/// Normalize user input: trimmed, lower-cased, `None` if nothing is left
pub fn search_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Keep the records matching `term`, in their original order.
///
/// An absent or blank term returns `records` untouched.
pub fn filter_records<T: Searchable>(records: Vec<T>, term: Option<&str>) -> Vec<T> {
    match search_term(term) {
        Some(term) => records.into_iter().filter(|r| r.matches(&term)).collect(),
        None => records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContainerId, DetailConfig, ImageId};

    fn container(name: &str, image: &str) -> ContainerDetail {
        ContainerDetail {
            id: ContainerId::new(format!("{}-id", name)),
            name: format!("/{}", name),
            config: DetailConfig {
                image: image.to_string(),
            },
            ..Default::default()
        }
    }

    fn image(tags: &[&str]) -> ImageSummary {
        ImageSummary {
            id: ImageId::new(format!("sha256:{}", tags.join(","))),
            repo_tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            ..Default::default()
        }
    }

    fn names(records: &[ContainerDetail]) -> Vec<&str> {
        records.iter().map(|c| c.display_name()).collect()
    }

    fn sample_containers() -> Vec<ContainerDetail> {
        vec![
            container("web", "nginx:latest"),
            container("db-primary", "postgres:14"),
        ]
    }

    #[test]
    fn test_container_search_by_name() {
        let result = filter_records(sample_containers(), Some("db"));
        assert_eq!(names(&result), vec!["db-primary"]);
    }

    #[test]
    fn test_container_search_by_image() {
        let result = filter_records(sample_containers(), Some("nginx"));
        assert_eq!(names(&result), vec!["web"]);
    }

    #[test]
    fn test_container_search_ignores_case() {
        let result = filter_records(sample_containers(), Some("  PostGres "));
        assert_eq!(names(&result), vec!["db-primary"]);
    }

    #[test]
    fn test_leading_slash_is_not_searchable() {
        let result = filter_records(sample_containers(), Some("/web"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_term_is_identity() {
        let input = vec![
            container("zeta", "alpine"),
            container("alpha", "busybox"),
            container("mid", "alpine"),
        ];
        for term in [None, Some(""), Some("   ")] {
            assert_eq!(filter_records(input.clone(), term), input);
        }
        assert!(filter_records(Vec::<ContainerDetail>::new(), None).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let input = vec![
            container("web", "nginx:latest"),
            container("web-2", "nginx:1.27"),
            container("db", "postgres:14"),
            container("cache", "redis:7"),
        ];
        for term in ["web", "nginx", "1", "x"] {
            let once = filter_records(input.clone(), Some(term));
            let twice = filter_records(once.clone(), Some(term));
            assert_eq!(once, twice, "term {}", term);
        }
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let input = vec![
            container("web", "nginx"),
            container("db", "postgres"),
            container("web", "nginx"),
        ];
        let result = filter_records(input, Some("web"));
        assert_eq!(names(&result), vec!["web", "web"]);
    }

    #[test]
    fn test_image_search_by_tag() {
        let input = vec![image(&["myapp:1.0"]), image(&["other:latest"])];
        let result = filter_records(input, Some("1.0"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].first_repo_tag(), Some("myapp:1.0"));
    }

    #[test]
    fn test_image_search_by_repository() {
        let input = vec![image(&["myapp:1.0"]), image(&["other:latest"])];
        let result = filter_records(input, Some("OTHER"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].first_repo_tag(), Some("other:latest"));
    }

    #[test]
    fn test_image_search_uses_first_tag_only() {
        let input = vec![image(&["example:1.0", "example:stable"])];
        assert!(filter_records(input.clone(), Some("stable")).is_empty());
        assert_eq!(filter_records(input, Some("example")).len(), 1);
    }

    #[test]
    fn test_untagged_images_never_match() {
        let dangling = ImageSummary {
            id: ImageId::new("sha256:abc"),
            repo_tags: None,
            ..Default::default()
        };
        let empty_tags = image(&[]);

        let input = vec![dangling.clone(), empty_tags.clone()];
        assert!(filter_records(input.clone(), Some("a")).is_empty());
        assert_eq!(filter_records(input, None), vec![dangling, empty_tags]);
    }

    #[test]
    fn test_search_term_normalization() {
        assert_eq!(search_term(None), None);
        assert_eq!(search_term(Some(" \t")), None);
        assert_eq!(search_term(Some(" Web ")), Some("web".to_string()));
    }
}
