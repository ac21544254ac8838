use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::board::BoardCategory;
use crate::utils::pagination::{PageParams, PageResponse};

/// 게시글 검색 대상
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Title,
    Content,
    #[default]
    All,
}

/// 게시글 목록 조회 조건
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BoardListQuery {
    pub category: Option<BoardCategory>,
    /// 검색 대상 (title, content, all)
    pub search_type: Option<SearchType>,
    pub keyword: Option<String>,
    /// 페이지 번호 (0부터 시작)
    pub page: Option<u64>,
    /// 페이지 크기
    pub size: Option<u64>,
}

impl BoardListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            size: self.size,
        }
    }

    /// 공백만 있는 검색어는 무시
    pub fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// 게시글 작성/수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardRequest {
    pub category: BoardCategory,

    #[validate(length(min = 1, max = 200, message = "제목은 1~200자 이내로 입력해야 합니다"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "내용은 1~10000자 이내로 입력해야 합니다"))]
    pub content: String,

    /// 공지 고정 여부 (관리자만 설정 가능)
    #[serde(default)]
    pub is_notice: bool,
}

/// 게시글 목록 항목
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub id: i64,
    pub category: BoardCategory,
    pub title: String,
    pub user_id: i64,
    pub author_name: Option<String>,
    pub is_notice: bool,
    pub view_count: i32,
    pub like_count: i32,
    pub comment_count: i64,
    #[schema(value_type = String)]
    pub created_at: NaiveDateTime,
}

/// 게시글 목록 응답 (공지 + 일반글 페이지)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardListResponse {
    pub notices: Vec<BoardSummary>,
    #[schema(value_type = Object)]
    pub boards: PageResponse<BoardSummary>,
}

/// 댓글 (대댓글은 한 단계만)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub board_id: i64,
    pub user_id: i64,
    pub author_name: Option<String>,
    pub parent_id: Option<i64>,
    pub content: String,
    #[schema(value_type = String)]
    pub created_at: NaiveDateTime,
    pub replies: Vec<CommentResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardDetailResponse {
    pub id: i64,
    pub category: BoardCategory,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub author_name: Option<String>,
    pub is_notice: bool,
    pub view_count: i32,
    pub like_count: i32,
    /// 조회자가 좋아요를 눌렀는지 여부
    pub liked: bool,
    pub comments: Vec<CommentResponse>,
    #[schema(value_type = String)]
    pub created_at: NaiveDateTime,
    #[schema(value_type = String)]
    pub updated_at: NaiveDateTime,
}

/// 댓글 작성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 1000, message = "댓글은 1~1000자 이내로 입력해야 합니다"))]
    pub content: String,

    /// 대댓글인 경우 상위 댓글 ID
    pub parent_id: Option<i64>,
}

/// 댓글 수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentUpdateRequest {
    #[validate(length(min = 1, max = 1000, message = "댓글은 1~1000자 이내로 입력해야 합니다"))]
    pub content: String,
}

/// 좋아요 토글 결과
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub liked: bool,
    pub like_count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_type_should_deserialize_lowercase() {
        let parsed: SearchType = serde_json::from_str("\"content\"").unwrap();
        assert_eq!(parsed, SearchType::Content);
    }

    #[test]
    fn blank_keyword_should_be_ignored() {
        let query = BoardListQuery {
            category: None,
            search_type: None,
            keyword: Some("   ".to_string()),
            page: None,
            size: None,
        };

        assert!(query.keyword().is_none());
    }
}
