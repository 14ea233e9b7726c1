use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "School Service API",
        version = "1.0.0",
        description = "REST backend for the student toolkit web app.\n\n**Ownership:** classes, budget and study tasks are scoped by the owner `email` (query string for GET/DELETE, body for POST/PUT). There is no authentication.\n\n**Features:**\n- Users (create-or-return by email)\n- Class schedule\n- Budget transactions\n- Study planner tasks\n- AI chat assistant\n- AI exam question generator"
    ),
    paths(
        // Health
        crate::api::health::health_check,
        crate::api::health::routes_info,

        // Users
        crate::api::users::list_users,
        crate::api::users::create_user,

        // Classes
        crate::api::classes::list_classes,
        crate::api::classes::create_class,
        crate::api::classes::delete_class,

        // Budget
        crate::api::budget::list_transactions,
        crate::api::budget::create_transaction,
        crate::api::budget::update_transaction,
        crate::api::budget::delete_transaction,

        // Study tasks
        crate::api::study_tasks::list_tasks,
        crate::api::study_tasks::create_task,
        crate::api::study_tasks::update_task,
        crate::api::study_tasks::delete_task,

        // AI
        crate::api::ai::chat,
        crate::api::ai::generate_questions,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::health::RouteInfo,
            crate::models::MutationResult,
            crate::models::CreateUserRequest,
            crate::models::UserResponse,
            crate::models::CreateClassRequest,
            crate::models::ClassResponse,
            crate::models::TransactionKind,
            crate::models::TransactionRequest,
            crate::models::TransactionResponse,
            crate::models::StudyTaskRequest,
            crate::models::StudyTaskResponse,
            crate::models::ChatRequest,
            crate::models::ChatResponse,
            crate::models::GenerateQuestionsRequest,
            crate::models::GeneratedQuestions,
            crate::models::MultipleChoice,
            crate::models::TrueFalse,
            crate::models::ShortAnswer,
        )
    ),
    tags(
        (name = "Health", description = "Liveness, store health and the route list."),
        (name = "Users", description = "User records keyed by email."),
        (name = "Classes", description = "Weekly class schedule, scoped by owner email."),
        (name = "Budget", description = "Income and expense transactions, scoped by owner email."),
        (name = "Study Tasks", description = "Study planner tasks, scoped by owner email."),
        (name = "AI", description = "Chat assistant and quiz generator backed by an OpenAI-compatible API."),
    )
)]
pub struct ApiDoc;
