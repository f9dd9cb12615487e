use axum::{
    Form, Router,
    extract::State,
    response::Html,
    routing::{get, post},
};

use crate::blockchain::record::RecordForm;
use crate::render::{Banner, PageView, render_page};
use crate::viewer::Viewer;

pub fn create_route() -> Router<Viewer> {
    Router::new()
        .route("/", get(index))
        .route("/actions/create-genesis-block", post(create_genesis_block))
        .route("/actions/add-block", post(add_block))
        .route("/actions/get-department-blocks", post(get_department_blocks))
}

async fn page(viewer: &Viewer, form: RecordForm, banner: Option<Banner>) -> Html<String> {
    let view = PageView {
        form,
        phase: viewer.phase(),
        banner,
        results: viewer.results().await,
    };
    Html(render_page(&view))
}

pub async fn index(State(viewer): State<Viewer>) -> Html<String> {
    page(&viewer, RecordForm::default(), None).await
}

pub async fn create_genesis_block(
    State(viewer): State<Viewer>,
    Form(form): Form<RecordForm>,
) -> Html<String> {
    let banner = match viewer.create_genesis_block(&form).await {
        Ok(submission) => Banner::Success(format!(
            "Genesis block submitted: {:?}",
            submission.tx_hash
        )),
        Err(e) => Banner::Error(e.to_string()),
    };
    page(&viewer, form, Some(banner)).await
}

pub async fn add_block(
    State(viewer): State<Viewer>,
    Form(form): Form<RecordForm>,
) -> Html<String> {
    let banner = match viewer.add_block(&form).await {
        Ok(submission) => Banner::Success(format!("Block submitted: {:?}", submission.tx_hash)),
        Err(e) => Banner::Error(e.to_string()),
    };
    page(&viewer, form, Some(banner)).await
}

pub async fn get_department_blocks(
    State(viewer): State<Viewer>,
    Form(form): Form<RecordForm>,
) -> Html<String> {
    let banner = match viewer.get_department_blocks(&form.department).await {
        Ok(_) => None,
        Err(e) => Some(Banner::Error(e.to_string())),
    };
    page(&viewer, form, banner).await
}
