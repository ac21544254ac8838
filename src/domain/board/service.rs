use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
    TransactionTrait,
};
use tracing::info;

use super::dto::{
    BoardDetailResponse, BoardListQuery, BoardListResponse, BoardRequest, BoardSummary,
    CommentRequest, CommentResponse, CommentUpdateRequest, LikeResponse, SearchType,
};
use super::entity::{board, board_like, comment};
use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::pagination::PageResponse;

const ACTIVE: &str = "Y";
const DELETED: &str = "N";

/// 작성자 본인 또는 관리자인지 확인
fn ensure_author(user: &AuthUser, author_id: i64) -> Result<(), AppError> {
    if user.is_admin() || user.user_id()? == author_id {
        Ok(())
    } else {
        Err(AppError::forbidden("작성자만 수정하거나 삭제할 수 있습니다."))
    }
}

/// 댓글 목록을 한 단계 트리로 구성합니다.
///
/// 상위 댓글이 삭제된 대댓글은 제외됩니다.
pub fn build_comment_tree(
    comments: Vec<comment::Model>,
    names: &HashMap<i64, String>,
) -> Vec<CommentResponse> {
    let to_response = |c: comment::Model| to_comment_response(c, names);

    let (roots, replies): (Vec<_>, Vec<_>) =
        comments.into_iter().partition(|c| c.parent_id.is_none());

    let mut replies_by_parent: HashMap<i64, Vec<CommentResponse>> = HashMap::new();
    for reply in replies {
        if let Some(parent_id) = reply.parent_id {
            replies_by_parent
                .entry(parent_id)
                .or_default()
                .push(to_response(reply));
        }
    }

    roots
        .into_iter()
        .map(|root| {
            let children = replies_by_parent.remove(&root.id).unwrap_or_default();
            let mut response = to_response(root);
            response.replies = children;
            response
        })
        .collect()
}

fn to_comment_response(c: comment::Model, names: &HashMap<i64, String>) -> CommentResponse {
    CommentResponse {
        id: c.id,
        board_id: c.board_id,
        user_id: c.user_id,
        author_name: names.get(&c.user_id).cloned(),
        parent_id: c.parent_id,
        content: c.content,
        created_at: c.created_at,
        replies: Vec::new(),
    }
}

async fn author_names<C: ConnectionTrait>(
    conn: &C,
    user_ids: impl IntoIterator<Item = i64>,
) -> Result<HashMap<i64, String>, AppError> {
    let ids: Vec<i64> = user_ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    Ok(user::Entity::find()
        .filter(user::Column::Id.is_in(ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|u| (u.id, u.full_name))
        .collect())
}

pub struct BoardService;

impl BoardService {
    /// 게시글 목록 조회
    ///
    /// 공지는 페이지와 별도로 모두 반환하고, 일반글은 최신순으로 페이지 처리합니다.
    pub async fn list(
        state: &AppState,
        query: BoardListQuery,
    ) -> Result<BoardListResponse, AppError> {
        let params = query.page_params();
        let (page, size) = (params.page(), params.size());

        let mut notice_query = board::Entity::find()
            .filter(board::Column::UseYn.eq(ACTIVE))
            .filter(board::Column::IsNotice.eq(true));
        if let Some(category) = query.category {
            notice_query = notice_query.filter(board::Column::Category.eq(category));
        }
        let notices = notice_query
            .order_by_desc(board::Column::CreatedAt)
            .order_by_desc(board::Column::Id)
            .all(&state.db)
            .await?;

        let paginator = Self::post_query(&query)
            .order_by_desc(board::Column::CreatedAt)
            .order_by_desc(board::Column::Id)
            .paginate(&state.db, size);
        let total = paginator.num_items().await?;
        let posts = paginator.fetch_page(page).await?;

        let notice_count = notices.len();
        let mut summaries =
            Self::summaries(state, notices.into_iter().chain(posts).collect()).await?;
        let content = summaries.split_off(notice_count);

        Ok(BoardListResponse {
            notices: summaries,
            boards: PageResponse::new(content, page, size, total),
        })
    }

    /// 일반글 검색 조건
    fn post_query(query: &BoardListQuery) -> Select<board::Entity> {
        let mut select = board::Entity::find()
            .filter(board::Column::UseYn.eq(ACTIVE))
            .filter(board::Column::IsNotice.eq(false));

        if let Some(category) = query.category {
            select = select.filter(board::Column::Category.eq(category));
        }

        if let Some(keyword) = query.keyword() {
            let condition = match query.search_type.unwrap_or_default() {
                SearchType::Title => Condition::all().add(board::Column::Title.contains(keyword)),
                SearchType::Content => {
                    Condition::all().add(board::Column::Content.contains(keyword))
                }
                SearchType::All => Condition::any()
                    .add(board::Column::Title.contains(keyword))
                    .add(board::Column::Content.contains(keyword)),
            };
            select = select.filter(condition);
        }

        select
    }

    async fn summaries(
        state: &AppState,
        boards: Vec<board::Model>,
    ) -> Result<Vec<BoardSummary>, AppError> {
        if boards.is_empty() {
            return Ok(Vec::new());
        }

        let board_ids: Vec<i64> = boards.iter().map(|b| b.id).collect();
        let comment_counts: HashMap<i64, i64> = comment::Entity::find()
            .select_only()
            .column(comment::Column::BoardId)
            .column_as(comment::Column::Id.count(), "comment_count")
            .filter(comment::Column::BoardId.is_in(board_ids))
            .filter(comment::Column::UseYn.eq(ACTIVE))
            .group_by(comment::Column::BoardId)
            .into_tuple::<(i64, i64)>()
            .all(&state.db)
            .await?
            .into_iter()
            .collect();

        let names = author_names(&state.db, boards.iter().map(|b| b.user_id)).await?;

        Ok(boards
            .into_iter()
            .map(|b| BoardSummary {
                id: b.id,
                category: b.category,
                title: b.title,
                user_id: b.user_id,
                author_name: names.get(&b.user_id).cloned(),
                is_notice: b.is_notice,
                view_count: b.view_count,
                like_count: b.like_count,
                comment_count: comment_counts.get(&b.id).copied().unwrap_or(0),
                created_at: b.created_at,
            })
            .collect())
    }

    /// 게시글 상세 조회 (조회수 증가)
    pub async fn detail(
        state: &AppState,
        viewer: Option<&AuthUser>,
        board_id: i64,
    ) -> Result<BoardDetailResponse, AppError> {
        let found = Self::find_active(state, board_id).await?;

        board::Entity::update_many()
            .col_expr(
                board::Column::ViewCount,
                Expr::col(board::Column::ViewCount).add(1),
            )
            .filter(board::Column::Id.eq(board_id))
            .exec(&state.db)
            .await?;

        let comments = comment::Entity::find()
            .filter(comment::Column::BoardId.eq(board_id))
            .filter(comment::Column::UseYn.eq(ACTIVE))
            .order_by_asc(comment::Column::Id)
            .all(&state.db)
            .await?;

        let names = author_names(
            &state.db,
            comments
                .iter()
                .map(|c| c.user_id)
                .chain(std::iter::once(found.user_id)),
        )
        .await?;

        let liked = match viewer {
            Some(viewer) => board_like::Entity::find()
                .filter(board_like::Column::BoardId.eq(board_id))
                .filter(board_like::Column::UserId.eq(viewer.user_id()?))
                .one(&state.db)
                .await?
                .is_some(),
            None => false,
        };

        Ok(BoardDetailResponse {
            id: found.id,
            category: found.category,
            title: found.title,
            content: found.content,
            user_id: found.user_id,
            author_name: names.get(&found.user_id).cloned(),
            is_notice: found.is_notice,
            view_count: found.view_count + 1,
            like_count: found.like_count,
            liked,
            comments: build_comment_tree(comments, &names),
            created_at: found.created_at,
            updated_at: found.updated_at,
        })
    }

    pub async fn create(
        state: &AppState,
        user: &AuthUser,
        req: BoardRequest,
    ) -> Result<BoardSummary, AppError> {
        if req.is_notice {
            user.require_admin()?;
        }
        let now = Utc::now().naive_utc();

        let created = board::ActiveModel {
            user_id: Set(user.user_id()?),
            category: Set(req.category),
            title: Set(req.title),
            content: Set(req.content),
            is_notice: Set(req.is_notice),
            view_count: Set(0),
            like_count: Set(0),
            use_yn: Set(ACTIVE.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(board_id = created.id, category = ?created.category, "Board created");

        Self::summaries(state, vec![created])
            .await?
            .pop()
            .ok_or_else(|| AppError::internal_error("created board missing"))
    }

    pub async fn update(
        state: &AppState,
        user: &AuthUser,
        board_id: i64,
        req: BoardRequest,
    ) -> Result<BoardSummary, AppError> {
        let found = Self::find_active(state, board_id).await?;
        ensure_author(user, found.user_id)?;
        if req.is_notice != found.is_notice {
            user.require_admin()?;
        }

        let mut active: board::ActiveModel = found.into();
        active.category = Set(req.category);
        active.title = Set(req.title);
        active.content = Set(req.content);
        active.is_notice = Set(req.is_notice);
        active.updated_at = Set(Utc::now().naive_utc());
        let updated = active.update(&state.db).await?;

        Self::summaries(state, vec![updated])
            .await?
            .pop()
            .ok_or_else(|| AppError::internal_error("updated board missing"))
    }

    /// 게시글 삭제 (use_yn = N)
    pub async fn delete(state: &AppState, user: &AuthUser, board_id: i64) -> Result<(), AppError> {
        let found = Self::find_active(state, board_id).await?;
        ensure_author(user, found.user_id)?;

        let mut active: board::ActiveModel = found.into();
        active.use_yn = Set(DELETED.to_string());
        active.updated_at = Set(Utc::now().naive_utc());
        active.update(&state.db).await?;

        info!(board_id, by = %user.username(), "Board deleted");
        Ok(())
    }

    /// 좋아요 추가/취소
    pub async fn toggle_like(
        state: &AppState,
        user: &AuthUser,
        board_id: i64,
    ) -> Result<LikeResponse, AppError> {
        let user_id = user.user_id()?;
        let txn = state.db.begin().await?;

        let found = board::Entity::find_by_id(board_id)
            .filter(board::Column::UseYn.eq(ACTIVE))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 게시글입니다."))?;

        let existing = board_like::Entity::find()
            .filter(board_like::Column::BoardId.eq(board_id))
            .filter(board_like::Column::UserId.eq(user_id))
            .one(&txn)
            .await?;

        let (liked, delta) = match existing {
            Some(like) => {
                like.delete(&txn).await?;
                (false, -1)
            }
            None => {
                board_like::ActiveModel {
                    board_id: Set(board_id),
                    user_id: Set(user_id),
                    created_at: Set(Utc::now().naive_utc()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
                (true, 1)
            }
        };

        board::Entity::update_many()
            .col_expr(
                board::Column::LikeCount,
                Expr::col(board::Column::LikeCount).add(delta),
            )
            .filter(board::Column::Id.eq(board_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(LikeResponse {
            liked,
            like_count: (found.like_count + delta).max(0),
        })
    }

    pub async fn create_comment(
        state: &AppState,
        user: &AuthUser,
        board_id: i64,
        req: CommentRequest,
    ) -> Result<CommentResponse, AppError> {
        Self::find_active(state, board_id).await?;

        if let Some(parent_id) = req.parent_id {
            let parent = comment::Entity::find_by_id(parent_id)
                .filter(comment::Column::UseYn.eq(ACTIVE))
                .one(&state.db)
                .await?
                .ok_or_else(|| AppError::not_found("존재하지 않는 댓글입니다."))?;

            if parent.board_id != board_id {
                return Err(AppError::bad_request(
                    "다른 게시글의 댓글에는 답글을 달 수 없습니다.",
                ));
            }
            if parent.parent_id.is_some() {
                return Err(AppError::bad_request("답글에는 답글을 달 수 없습니다."));
            }
        }

        let now = Utc::now().naive_utc();
        let created = comment::ActiveModel {
            board_id: Set(board_id),
            user_id: Set(user.user_id()?),
            parent_id: Set(req.parent_id),
            content: Set(req.content),
            use_yn: Set(ACTIVE.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        Self::comment_response(state, created).await
    }

    pub async fn update_comment(
        state: &AppState,
        user: &AuthUser,
        comment_id: i64,
        req: CommentUpdateRequest,
    ) -> Result<CommentResponse, AppError> {
        let found = Self::find_active_comment(state, comment_id).await?;
        ensure_author(user, found.user_id)?;

        let mut active: comment::ActiveModel = found.into();
        active.content = Set(req.content);
        active.updated_at = Set(Utc::now().naive_utc());
        let updated = active.update(&state.db).await?;

        Self::comment_response(state, updated).await
    }

    /// 댓글 삭제 (use_yn = N)
    pub async fn delete_comment(
        state: &AppState,
        user: &AuthUser,
        comment_id: i64,
    ) -> Result<(), AppError> {
        let found = Self::find_active_comment(state, comment_id).await?;
        ensure_author(user, found.user_id)?;

        let mut active: comment::ActiveModel = found.into();
        active.use_yn = Set(DELETED.to_string());
        active.updated_at = Set(Utc::now().naive_utc());
        active.update(&state.db).await?;

        Ok(())
    }

    async fn comment_response(
        state: &AppState,
        model: comment::Model,
    ) -> Result<CommentResponse, AppError> {
        let names = author_names(&state.db, [model.user_id]).await?;
        Ok(to_comment_response(model, &names))
    }

    async fn find_active(state: &AppState, board_id: i64) -> Result<board::Model, AppError> {
        board::Entity::find_by_id(board_id)
            .filter(board::Column::UseYn.eq(ACTIVE))
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 게시글입니다."))
    }

    async fn find_active_comment(
        state: &AppState,
        comment_id: i64,
    ) -> Result<comment::Model, AppError> {
        let found = comment::Entity::find_by_id(comment_id)
            .filter(comment::Column::UseYn.eq(ACTIVE))
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 댓글입니다."))?;

        // 삭제된 게시글의 댓글은 수정할 수 없다
        let board_active = found
            .find_related(board::Entity)
            .filter(board::Column::UseYn.eq(ACTIVE))
            .one(&state.db)
            .await?
            .is_some();
        if !board_active {
            return Err(AppError::not_found("존재하지 않는 게시글입니다."));
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn comment(id: i64, parent_id: Option<i64>) -> comment::Model {
        let now = Utc::now().naive_utc();
        comment::Model {
            id,
            board_id: 1,
            user_id: 10,
            parent_id,
            content: format!("comment {}", id),
            use_yn: ACTIVE.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn replies_should_be_nested_under_parent() {
        let comments = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, None),
            comment(4, Some(1)),
        ];
        let names = HashMap::from([(10, "작성자".to_string())]);

        let tree = build_comment_tree(comments, &names);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].replies.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 4]);
        assert!(tree[1].replies.is_empty());
        assert_eq!(tree[0].author_name.as_deref(), Some("작성자"));
    }

    #[test]
    fn orphan_reply_should_be_dropped() {
        let tree = build_comment_tree(vec![comment(5, Some(99))], &HashMap::new());

        assert!(tree.is_empty());
    }
}
