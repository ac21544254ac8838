use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 100;

/// 페이지 요청 파라미터 (page는 0부터 시작)
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 페이지 번호 (0부터 시작)
    pub page: Option<u64>,
    /// 페이지 크기 (최대 100)
    pub size: Option<u64>,
}

impl PageParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(0)
    }

    /// 기본 크기를 지정해 페이지 크기 반환
    pub fn size_or(&self, default_size: u64) -> u64 {
        self.size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn size(&self) -> u64 {
        self.size_or(DEFAULT_PAGE_SIZE)
    }
}

/// 페이지 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T: Serialize> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T: Serialize> PageResponse<T> {
    pub fn new(content: Vec<T>, page: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };

        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}
