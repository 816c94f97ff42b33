use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::debug;

use rust_tutor_portal::config::AppConfig;
use rust_tutor_portal::errors::{PortalError, Result};
use rust_tutor_portal::models::homeworks::requests::{AddQuestionRequest, CreateHomeworkRequest};
use rust_tutor_portal::models::lessons::entities::LessonStatus;
use rust_tutor_portal::models::lessons::requests::{LessonFilter, StatusFilter};
use rust_tutor_portal::runtime::lifetime::startup::{StartupContext, prepare_client_startup};
use rust_tutor_portal::services::assignments::{SubmitOutcome, TeacherAssignmentsBoard};
use rust_tutor_portal::services::lessons::LessonHistoryBoard;
use rust_tutor_portal::utils::format::format_status_actions;
use rust_tutor_portal::utils::{
    format_amount, format_lesson_window, parse_due_date, validate_date_bound,
};

#[derive(Parser, Debug)]
#[command(
    name = "tutor-portal",
    version,
    about = "Lesson status and homework workflows for the tutoring platform"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Teacher lesson history and status updates
    Lessons {
        #[command(subcommand)]
        action: LessonsCommand,
    },
    /// Lessons of the signed-in student
    MyLessons,
    /// Homework template library and assignment
    Homework {
        #[command(subcommand)]
        action: HomeworkCommand,
    },
    /// Assignment answering and results
    Assignments {
        #[command(subcommand)]
        action: AssignmentsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum LessonsCommand {
    /// List lessons, filtered client-side
    List {
        /// Status to show, or "all"
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        /// Case-insensitive student name fragment
        #[arg(long, default_value = "")]
        search: String,
        /// First start date to include (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        from: String,
        /// Last start date to include (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        to: String,
    },
    /// Move a lesson to COMPLETED, STUDENT_ABSENT or CANCELLED
    Transition { lesson_id: i64, status: LessonStatus },
}

#[derive(Subcommand, Debug)]
enum HomeworkCommand {
    /// List homework templates
    Library,
    /// Create an empty homework template
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        level: String,
    },
    /// Append one question to a template
    AddQuestion {
        homework_id: i64,
        #[arg(long)]
        text: String,
        #[arg(long, default_value_t = 1)]
        points: i64,
        /// Option text, repeat for each option
        #[arg(long = "option", required = true)]
        options: Vec<String>,
        /// 1-based position of a correct option, repeatable
        #[arg(long = "correct")]
        correct: Vec<usize>,
    },
    /// Delete a template
    Delete { homework_id: i64 },
    /// Assign a template to a lesson
    Assign {
        lesson_id: i64,
        homework_id: i64,
        /// Due date (YYYY-MM-DD)
        due_date: String,
    },
}

#[derive(Subcommand, Debug)]
enum AssignmentsCommand {
    /// Assignments given by the signed-in teacher
    Teacher,
    /// Show one assignment with its questions
    Show { assignment_id: i64 },
    /// Answer and submit an assignment
    Submit {
        assignment_id: i64,
        /// QUESTION_ID:OPTION_ID, repeat for each answer
        #[arg(long = "answer")]
        answers: Vec<String>,
        /// Submit without asking when some questions are unanswered
        #[arg(long)]
        yes: bool,
    },
    /// Per-question breakdown of a submitted assignment
    Details { assignment_id: i64 },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    setup_panic!();

    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        return ExitCode::FAILURE;
    }
    let config = AppConfig::get();

    // 日志写 stderr，stdout 只留给命令输出，便于管道处理
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(io::stderr());
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    let cli = Cli::parse();
    debug!(?cli, "Parsed command line");

    let result = match prepare_client_startup() {
        Ok(ctx) => run(&ctx, cli.command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &PortalError) {
    #[cfg(debug_assertions)]
    eprintln!("{}", err.format_colored());
    #[cfg(not(debug_assertions))]
    eprintln!("{}", err.format_simple());
}

async fn run(ctx: &StartupContext, command: Command) -> Result<()> {
    match command {
        Command::Lessons { action } => run_lessons(ctx, action).await,
        Command::MyLessons => my_lessons(ctx).await,
        Command::Homework { action } => run_homework(ctx, action).await,
        Command::Assignments { action } => run_assignments(ctx, action).await,
    }
}

async fn run_lessons(ctx: &StartupContext, action: LessonsCommand) -> Result<()> {
    let config = AppConfig::get();
    let mut board = LessonHistoryBoard::new(ctx.lesson_service());

    match action {
        LessonsCommand::List {
            status,
            search,
            from,
            to,
        } => {
            validate_date_bound(&from)?;
            validate_date_bound(&to)?;
            board.refresh().await;
            if let Some(err) = board.load_error() {
                println!("Could not load lessons: {err}");
                return Ok(());
            }
            board.set_filter(LessonFilter {
                status,
                search,
                from,
                to,
            });

            let visible = board.visible();
            if visible.is_empty() {
                println!("No lessons match the current filters.");
            }
            for lesson in visible {
                let payout = match lesson.effective_payout_status() {
                    Some(status) => format!(
                        "{} ({})",
                        format_amount(&config.ui.currency_symbol, lesson.payout_amount),
                        status.label()
                    ),
                    None => "-".to_string(),
                };
                let actions = format_status_actions(lesson.status)
                    .map(|a| format!("  -> {a}"))
                    .unwrap_or_default();
                println!(
                    "#{:<5} {:<28} {:<24} {:<15} payout {}{}",
                    lesson.id,
                    format_lesson_window(&lesson.start_time, &lesson.end_time),
                    lesson.student_name,
                    lesson.status.label(),
                    payout,
                    actions
                );
            }
            Ok(())
        }
        LessonsCommand::Transition { lesson_id, status } => {
            board.refresh().await;
            if let Some(err) = board.load_error() {
                return Err(PortalError::network(err.to_string()));
            }
            let toast = board.transition(lesson_id, status).await?;
            println!("{}", toast.message);
            if let Some(lesson) = board.lesson(lesson_id) {
                println!(
                    "Lesson #{} is now {} (credit used: {})",
                    lesson.id,
                    lesson.status.label(),
                    if lesson.credit_used { "yes" } else { "no" }
                );
            }
            Ok(())
        }
    }
}

async fn my_lessons(ctx: &StartupContext) -> Result<()> {
    let lessons = ctx.lesson_service().list_my_lessons().await?;
    if lessons.is_empty() {
        println!("No lessons yet.");
    }
    for lesson in lessons {
        println!(
            "#{:<5} {:<28} with {:<20} {}",
            lesson.id,
            format_lesson_window(&lesson.start_time, &lesson.end_time),
            lesson.teacher_name,
            lesson.status.label()
        );
        for assignment in &lesson.assignments {
            let state = if assignment.is_completed {
                format!(
                    "done, {}%",
                    assignment.percentage.map(|p| format!("{p:.0}")).unwrap_or_default()
                )
            } else {
                format!("due {}", assignment.due_date.as_deref().unwrap_or("-"))
            };
            println!("        homework #{} {} ({state})", assignment.id, assignment.homework_title);
        }
    }
    Ok(())
}

async fn run_homework(ctx: &StartupContext, action: HomeworkCommand) -> Result<()> {
    let service = ctx.homework_service();
    match action {
        HomeworkCommand::Library => {
            for template in service.list_library().await? {
                println!(
                    "#{:<5} {:<32} level {:<10} {} question(s), {} point(s)",
                    template.id,
                    template.title,
                    template.level,
                    template.questions.len(),
                    template.total_points()
                );
            }
            Ok(())
        }
        HomeworkCommand::Create {
            title,
            description,
            level,
        } => {
            let draft = service
                .create_template(CreateHomeworkRequest {
                    title,
                    description,
                    level,
                })
                .await?;
            println!(
                "Created homework #{}; add questions with `add-question {}`",
                draft.id(),
                draft.id()
            );
            Ok(())
        }
        HomeworkCommand::AddQuestion {
            homework_id,
            text,
            points,
            options,
            correct,
        } => {
            if let Some(bad) = correct.iter().find(|&&i| i == 0 || i > options.len()) {
                return Err(PortalError::validation(format!(
                    "--correct {bad} does not match any of the {} option(s)",
                    options.len()
                )));
            }
            let req = options
                .into_iter()
                .enumerate()
                .fold(AddQuestionRequest::new(text, points), |req, (i, option)| {
                    req.option(option, correct.contains(&(i + 1)))
                });
            let question = service.add_question(homework_id, req).await?;
            println!(
                "Added question #{} with {} option(s) to homework #{homework_id}",
                question.id,
                question.options.len()
            );
            Ok(())
        }
        HomeworkCommand::Delete { homework_id } => {
            service.delete_template(homework_id).await?;
            println!("Deleted homework #{homework_id}");
            Ok(())
        }
        HomeworkCommand::Assign {
            lesson_id,
            homework_id,
            due_date,
        } => {
            let due_date = parse_due_date(&due_date)?;
            let assignment = service.assign(lesson_id, homework_id, due_date).await?;
            println!(
                "Assigned homework #{homework_id} to lesson #{lesson_id} as assignment #{} (due {due_date})",
                assignment.id
            );
            Ok(())
        }
    }
}

async fn run_assignments(ctx: &StartupContext, action: AssignmentsCommand) -> Result<()> {
    let service = ctx.assignment_service();
    match action {
        AssignmentsCommand::Teacher => {
            let mut board = TeacherAssignmentsBoard::new(service);
            board.refresh().await;
            if let Some(err) = board.load_error() {
                println!("Could not load assignments: {err}");
                return Ok(());
            }
            for a in board.assignments() {
                let state = if a.is_completed {
                    format!(
                        "score {}/{}",
                        a.score.map(|s| s.to_string()).unwrap_or_default(),
                        a.total_points.map(|t| t.to_string()).unwrap_or_default()
                    )
                } else {
                    "not submitted".to_string()
                };
                println!(
                    "#{:<5} {:<28} {:<20} due {:<12} {state}",
                    a.id,
                    a.homework_title,
                    a.student_name.as_deref().unwrap_or("-"),
                    a.due_date.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
        AssignmentsCommand::Show { assignment_id } => {
            let session = service.open_quiz(assignment_id).await?;
            let assignment = session.assignment();
            println!("{} (assignment #{})", assignment.homework_title, assignment.id);
            for question in &assignment.questions {
                println!("  Q{} [{} pt] {}", question.id, question.points, question.text);
                for option in &question.options {
                    println!("      {:>5}: {}", option.id, option.text);
                }
            }
            if let Some(result) = session.result() {
                println!("Submitted: {} / {} ({:.0}%)", result.score, result.total, result.percent());
            }
            Ok(())
        }
        AssignmentsCommand::Submit {
            assignment_id,
            answers,
            yes,
        } => {
            let mut session = service.open_quiz(assignment_id).await?;
            for raw in &answers {
                let (question_id, option_id) = parse_answer(raw)?;
                session.choose(question_id, option_id)?;
            }
            let outcome = session
                .submit(|info| {
                    yes || confirm(&format!(
                        "{} of {} question(s) unanswered. Submit anyway?",
                        info.missing(),
                        info.total
                    ))
                })
                .await?;
            match outcome {
                SubmitOutcome::Submitted(result) => println!(
                    "Submitted: {} / {} ({:.0}%)",
                    result.score,
                    result.total,
                    result.percent()
                ),
                SubmitOutcome::Declined => println!("Submission cancelled."),
            }
            Ok(())
        }
        AssignmentsCommand::Details { assignment_id } => {
            let detail = service.get_details(assignment_id).await?;
            for row in &detail.questions {
                println!(
                    "  [{}] {} -> {} (correct: {}) {} pt",
                    if row.is_correct { "x" } else { " " },
                    row.question_text,
                    row.student_answer.as_deref().unwrap_or("(no answer)"),
                    row.correct_answer,
                    row.points_earned
                );
            }
            println!(
                "{} of {} correct, score {}/{}",
                detail.correct_count(),
                detail.questions.len(),
                detail.score.map(|s| s.to_string()).unwrap_or_default(),
                detail.total.map(|t| t.to_string()).unwrap_or_default()
            );
            Ok(())
        }
    }
}

fn parse_answer(raw: &str) -> Result<(i64, i64)> {
    let (q, o) = raw
        .split_once(':')
        .ok_or_else(|| PortalError::validation(format!("Answer '{raw}' must be QUESTION_ID:OPTION_ID")))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<i64>()
            .map_err(|_| PortalError::validation(format!("Answer '{raw}' must be QUESTION_ID:OPTION_ID")))
    };
    Ok((parse(q)?, parse(o)?))
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => matches!(line.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}
