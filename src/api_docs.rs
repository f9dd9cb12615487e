use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::route::health_check,
        crate::routes::account::route::get_selected_account,
        crate::routes::blocks::route::create_genesis_block,
        crate::routes::blocks::route::add_block,
        crate::routes::departments::route::get_department_blocks,
    ),
    components(
        schemas(
            crate::routes::health::dto::HealthResponse,
            crate::routes::account::dto::AccountResponse,
            crate::routes::blocks::dto::CreateBlockRequest,
            crate::routes::blocks::dto::SubmissionResponse,
            crate::routes::departments::dto::DepartmentBlocksResponse,
            crate::blockchain::record::AcademicRecord,
            crate::errors::ErrorResponse,
            crate::errors::ErrorKind,
            crate::viewer::Phase,
        ),
    ),
    tags(
        (name = "Blocks", description = "Record submission endpoints"),
        (name = "Departments", description = "Department chain queries"),
        (name = "Account", description = "Wallet account endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
)]
pub struct ApiDoc;
