// Use case: list_posts.

use crate::application::context::AppContext;
use crate::infrastructure::db::dto::{PostFilter, PostRow};

pub const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Pages through posts with optional status, category, tag and text filters.
pub struct ListPostsUseCase;

#[derive(Debug)]
pub enum ListPostsError {
    Storage(String),
}

#[derive(Debug, Clone, Default)]
pub struct ListPostsQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ListPostsResult {
    pub posts: Vec<PostRow>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

fn filter_value(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl ListPostsUseCase {
    pub async fn execute(
        ctx: &AppContext,
        query: ListPostsQuery,
    ) -> Result<ListPostsResult, ListPostsError> {
        // Step 1: Normalize paging and filters.
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = query.offset.unwrap_or(0).max(0);
        let filter = PostFilter {
            status: filter_value(query.status),
            category: filter_value(query.category),
            tag: filter_value(query.tag),
            search: filter_value(query.search),
            limit,
            offset,
        };

        // Step 2: Fetch the page and the filtered total.
        let (posts, total) = ctx
            .repos
            .post
            .list(&filter)
            .await
            .map_err(|e| ListPostsError::Storage(format!("{e:?}")))?;

        Ok(ListPostsResult {
            posts,
            total,
            limit,
            offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ListPostsQuery, ListPostsUseCase};
    use crate::application::context::test_support::test_context;
    use crate::application::usecases::create_post::{CreatePostCommand, CreatePostUseCase};

    #[tokio::test]
    async fn given_tagged_posts_when_filtered_by_tag_should_return_matches() {
        let ctx = test_context();
        for (title, tags) in [("Rust One", vec!["rust"]), ("Go One", vec!["go"])] {
            CreatePostUseCase::execute(
                &ctx,
                CreatePostCommand {
                    title: title.to_string(),
                    content: "body".to_string(),
                    tag_slugs: Some(tags.into_iter().map(str::to_string).collect()),
                    ..CreatePostCommand::default()
                },
            )
            .await
            .unwrap();
        }

        let result = ListPostsUseCase::execute(
            &ctx,
            ListPostsQuery {
                tag: Some("rust".to_string()),
                ..ListPostsQuery::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.posts[0].slug, "rust-one");
        assert_eq!(result.limit, 10);
        assert_eq!(result.offset, 0);
    }

    #[tokio::test]
    async fn given_out_of_range_paging_when_execute_should_clamp() {
        let ctx = test_context();

        let result = ListPostsUseCase::execute(
            &ctx,
            ListPostsQuery {
                limit: Some(0),
                offset: Some(-5),
                ..ListPostsQuery::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(result.limit, 1);
        assert_eq!(result.offset, 0);
    }
}
