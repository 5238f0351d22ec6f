pub mod attempt_handler;
pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

pub use attempt_handler::{
    attempt_summary, best_score, can_attempt, get_attempt, my_attempts, quiz_attempts,
    start_attempt, submit_attempt,
};
pub use health_handler::{health_check, health_check_live};
pub use quiz_handler::get_quiz;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_live)
        .service(start_attempt)
        .service(submit_attempt)
        .service(best_score)
        .service(can_attempt)
        .service(attempt_summary)
        .service(quiz_attempts)
        .service(get_quiz)
        .service(my_attempts)
        .service(get_attempt);
}
