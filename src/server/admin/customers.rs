//! Customer list of the admin panel

use super::{AdminResult, AdminState, Flash, Pager};
use crate::core::PageQuery;
use axum::{
    extract::{Query, State},
    response::Html,
};
use tera::Context;

pub async fn index(
    State(state): State<AdminState>,
    Query(query): Query<PageQuery>,
    Query(flash): Query<Flash>,
) -> AdminResult<Html<String>> {
    let page = state.app.customers.list(query.page()).await?;

    let mut context = Context::new();
    context.insert("pager", &Pager::from(&page.pagination));
    context.insert("page", &page);
    context.insert("query", "");
    context.insert("error", &flash.error);
    state.render("customers/list.html", &context)
}
