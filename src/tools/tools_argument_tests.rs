//! Tests for comments, reply and post content tool argument parsing and behavior

#[cfg(test)]
mod tools_argument_parsing_tests {
    use crate::cli::{CommentsArgs, PostContentArgs, ReplyArgs, SearchArgs, TimeFilter};

    #[test]
    fn test_comments_args_defaults() {
        let args: CommentsArgs =
            serde_json::from_value(serde_json::json!({ "submission_id": "1abcde" })).unwrap();

        assert_eq!(args.submission_id, "1abcde");
        assert_eq!(args.limit, 25);
    }

    #[test]
    fn test_comments_args_require_submission_id() {
        let result: Result<CommentsArgs, _> = serde_json::from_value(serde_json::json!({ "limit": 3 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_reply_args_require_text() {
        let result: Result<ReplyArgs, _> =
            serde_json::from_value(serde_json::json!({ "comment_id": "t1_abc" }));
        assert!(result.is_err());

        let args: ReplyArgs = serde_json::from_value(serde_json::json!({
            "comment_id": "t1_abc",
            "text": "Thanks for the pointer"
        }))
        .unwrap();
        assert_eq!(args.text, "Thanks for the pointer");
    }

    #[test]
    fn test_post_content_args_defaults() {
        let args: PostContentArgs =
            serde_json::from_value(serde_json::json!({ "post_id": "q1w2e3" })).unwrap();

        assert_eq!(args.comment_limit, 20);
        assert_eq!(args.comment_depth, 3);
    }

    #[test]
    fn test_post_content_args_explicit_bounds() {
        let args: PostContentArgs = serde_json::from_value(serde_json::json!({
            "post_id": "q1w2e3",
            "comment_limit": 5,
            "comment_depth": 0
        }))
        .unwrap();

        assert_eq!(args.comment_limit, 5);
        assert_eq!(args.comment_depth, 0);
    }

    #[test]
    fn test_negative_limit_rejected() {
        let result: Result<CommentsArgs, _> = serde_json::from_value(serde_json::json!({
            "submission_id": "abc",
            "limit": -1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_search_args_time_filter() {
        let args: SearchArgs = serde_json::from_value(serde_json::json!({
            "query": "rust",
            "time_filter": "month"
        }))
        .unwrap();
        assert_eq!(args.time_filter, Some(TimeFilter::Month));
    }
}

#[cfg(test)]
mod tools_behavior_tests {
    use crate::content::model::{CommentNode, Continuation};
    use crate::reddit::fake::{comment_node, post, FakeReddit};
    use crate::tools::{comments, post_content};

    #[tokio::test]
    async fn test_continue_thread_marker_expanded_once() {
        let api = FakeReddit::new()
            .with_comments(vec![comment_node(
                "root",
                Some("op"),
                vec![CommentNode::More(Continuation {
                    id: "_".to_string(),
                    parent_id: "t1_root".to_string(),
                    children: vec![],
                    count: 0,
                })],
            )])
            .with_expansion("_", vec![comment_node("deep", Some("diver"), vec![])]);

        let found = comments::submission_comments(&api, "abc", 25).await;

        let ids: Vec<&str> = found.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "deep"]);
        assert_eq!(api.expanded_markers(), vec!["_".to_string()]);
    }

    #[tokio::test]
    async fn test_post_content_depth_zero_has_no_comments() {
        let api = FakeReddit::new()
            .with_post(post("p1", "rust", Some("ferris")))
            .with_tree(vec![crate::content::model::Comment::test_leaf("c1")]);

        let doc = post_content::post_content(&api, "p1", 20, 0).await;

        assert!(doc.ends_with("\nNo comments found."));
        assert!(!doc.contains("* Author"));
    }
}
