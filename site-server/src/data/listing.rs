use crate::domain::pagination::PageRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OrderBy {
    Id,
    CreatedAt,
}

impl OrderBy {
    pub(crate) fn column(self) -> &'static str {
        match self {
            OrderBy::Id => "id",
            OrderBy::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListParams {
    pub(crate) order_by: OrderBy,
    pub(crate) descending: bool,
    pub(crate) offset: u32,
    pub(crate) limit: u32,
}

impl ListParams {
    pub(crate) fn page(order_by: OrderBy, descending: bool, request: PageRequest) -> Self {
        Self {
            order_by,
            descending,
            offset: request.offset(),
            limit: request.page_size,
        }
    }

    /// `ORDER BY` clause built from a fixed column whitelist; ties fall back to id.
    pub(crate) fn order_clause(&self) -> String {
        let direction = if self.descending { "DESC" } else { "ASC" };
        match self.order_by {
            OrderBy::Id => format!("ORDER BY id {direction}"),
            other => format!("ORDER BY {} {direction}, id {direction}", other.column()),
        }
    }
}

/// One page of rows plus the total row count.
#[derive(Debug, Clone)]
pub(crate) struct Listing<T> {
    pub(crate) items: Vec<T>,
    pub(crate) total: i64,
}

#[cfg(test)]
mod tests {
    use super::{ListParams, OrderBy};
    use crate::domain::pagination::PageRequest;

    #[test]
    fn order_clause_breaks_ties_by_id() {
        let params = ListParams::page(OrderBy::CreatedAt, true, PageRequest::new(2, 3));
        assert_eq!(params.order_clause(), "ORDER BY created_at DESC, id DESC");
        assert_eq!(params.offset, 3);
        assert_eq!(params.limit, 3);
    }

    #[test]
    fn order_by_id_has_single_key() {
        let params = ListParams::page(OrderBy::Id, false, PageRequest::new(1, 10));
        assert_eq!(params.order_clause(), "ORDER BY id ASC");
    }
}
