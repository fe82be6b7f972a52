use anyhow::Result;
use clap::{Parser, Subcommand};

use gymctl::api::assignments::AssignmentStatus;
use gymctl::api::exercises::{CreateExerciseRequest, Level};
use gymctl::api::expenses::{CreateExpenseRequest, UpdateExpenseRequest};
use gymctl::api::members::{CreateMemberRequest, UpdateMemberRequest};
use gymctl::api::staff::CreateStaffRequest;
use gymctl::cli::{self, Console};
use gymctl::permissions::CanonicalAction;
use gymctl::ConsoleConfig;

#[derive(Parser)]
#[command(
    name = "gymctl",
    about = "Gym management console — phone-OTP login, members, payments, and role permissions from the terminal",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Gym management API base URL
    #[arg(long, env = "GYMCTL_API_URL")]
    api_url: Option<String>,

    /// Data directory for config.toml, session.json, and log files
    #[arg(long, env = "GYMCTL_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GYMCTL_LOG")]
    log: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "GYMCTL_LOG_FILE")]
    log_file: Option<std::path::PathBuf>,

    /// Suppress informational output.
    ///
    /// Errors are still printed to stderr. Data output (tables, --json flags)
    /// is unaffected. Use this flag when scripting around the console.
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with phone number + one-time code.
    ///
    /// Prompts for a phone number, asks the backend to send an OTP, then
    /// reads the code interactively. At the OTP prompt: `r` resends once the
    /// countdown unlocks, `b` returns to phone entry, `q` quits.
    ///
    /// Examples:
    ///   gymctl login
    ///   gymctl login --phone "+91 98765 43210"
    Login {
        /// Phone number (skips the first prompt)
        #[arg(long)]
        phone: Option<String>,
    },
    /// Sign out and delete the stored session.
    Logout,
    /// Show the signed-in user.
    ///
    /// Examples:
    ///   gymctl whoami
    ///   gymctl whoami --json
    Whoami {
        /// Print the session user as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage gym members.
    ///
    /// Examples:
    ///   gymctl members list --page 2
    ///   gymctl members search asha
    ///   gymctl members add --name "Asha Rao" --phone 9876543210 --days 90 --mode upi
    ///   gymctl members remove 665f1c0a2e8b4d0012345678 --yes
    Members {
        #[command(subcommand)]
        action: MembersAction,
    },
    /// Manage staff records.
    ///
    /// Examples:
    ///   gymctl staff list
    ///   gymctl staff add --name "Vikram S" --phone 9812345678 --role trainer \
    ///       --designation "Senior Trainer" --joined 2025-06-01 --salary 32000
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
    /// Inspect payments.
    ///
    /// Payments are created by the backend when members enrol or renew, so
    /// there is no `add` here.
    ///
    /// Examples:
    ///   gymctl payments list --status pending
    ///   gymctl payments stats
    Payments {
        #[command(subcommand)]
        action: PaymentsAction,
    },
    /// Track gym expenses.
    ///
    /// Examples:
    ///   gymctl expenses list --category equipment --from 2025-07-01
    ///   gymctl expenses add --title "Treadmill belt" --amount 5400 \
    ///       --category maintenance --date 2025-08-20 --method cash
    Expenses {
        #[command(subcommand)]
        action: ExpensesAction,
    },
    /// Manage membership plans.
    ///
    /// Examples:
    ///   gymctl plans list
    ///   gymctl plans add --name Quarterly --days 90 --price 4500
    Plans {
        #[command(subcommand)]
        action: PlansAction,
    },
    /// Browse and edit the exercise library.
    ///
    /// Examples:
    ///   gymctl exercises list --level beginner --search press
    ///   gymctl exercises body-parts
    ///   gymctl exercises muscles 3
    Exercises {
        #[command(subcommand)]
        action: ExercisesAction,
    },
    /// Review member check-ins and check-outs.
    ///
    /// Examples:
    ///   gymctl attendance list --from 2025-08-01 --to 2025-08-25
    ///   gymctl attendance checkout 665f1c0a2e8b4d0012345678
    Attendance {
        #[command(subcommand)]
        action: AttendanceAction,
    },
    /// Manage trainer assignments.
    ///
    /// Examples:
    ///   gymctl assignments list --status Active
    ///   gymctl assignments assign --member 665f... --trainer 664a...
    ///   gymctl assignments stats
    Assignments {
        #[command(subcommand)]
        action: AssignmentsAction,
    },
    /// Manage user accounts and their roles.
    ///
    /// Examples:
    ///   gymctl users list --search 98765
    ///   gymctl users add --phone 9876500001 --role 663e4b1a9c2d7e0011223344
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Manage roles.
    ///
    /// Examples:
    ///   gymctl roles list
    ///   gymctl roles create --name front_desk --description "Front desk staff"
    Roles {
        #[command(subcommand)]
        action: RolesAction,
    },
    /// Edit a role's module permissions.
    ///
    /// The grid always covers every module with create/read/update/delete/
    /// export slots, whether or not the backend has granted them yet; edits
    /// are saved back as the flat list of granted codes.
    ///
    /// Examples:
    ///   gymctl permissions show 663e4b1a9c2d7e0011223344
    ///   gymctl permissions grant 663e4b1a9c2d7e0011223344 members export
    ///   gymctl permissions toggle-module 663e4b1a9c2d7e0011223344 payments
    ///   gymctl permissions grant-all 663e4b1a9c2d7e0011223344 --yes
    Permissions {
        #[command(subcommand)]
        action: PermissionsAction,
    },
}

#[derive(Subcommand)]
enum MembersAction {
    /// List members (paginated).
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Search by name, phone, or member code.
    Search {
        query: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one member in full.
    Show { id: String },
    /// Enrol a new member (creates the user, membership, and opening payment).
    Add {
        /// Full name
        #[arg(long)]
        name: String,
        /// Phone number (validated and normalized before sending)
        #[arg(long)]
        phone: String,
        /// Membership length in days
        #[arg(long)]
        days: u32,
        /// Payment mode for the opening payment (cash, card, upi)
        #[arg(long)]
        mode: String,
        #[arg(long)]
        gender: Option<String>,
        /// Date of birth, YYYY-MM-DD
        #[arg(long)]
        dob: Option<String>,
        /// Discount amount off the plan price
        #[arg(long)]
        discount: Option<f64>,
        /// Payment reference number
        #[arg(long)]
        reference: Option<String>,
    },
    /// Update a member.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// New membership length in days
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        discount: Option<f64>,
        /// Membership status (active, expired, suspended)
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a member.
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum StaffAction {
    /// List staff (paginated).
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Search by name, phone, or designation.
    Search {
        query: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one staff record in full.
    Show { id: String },
    /// Add a staff member.
    Add {
        /// Full name
        #[arg(long)]
        name: String,
        /// Phone number (validated and normalized before sending)
        #[arg(long)]
        phone: String,
        /// Staff role (trainer, manager, receptionist, ...)
        #[arg(long)]
        role: String,
        /// Job title shown on the roster
        #[arg(long)]
        designation: String,
        /// Joining date, YYYY-MM-DD
        #[arg(long)]
        joined: String,
        /// Monthly salary
        #[arg(long)]
        salary: f64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// Emergency contact number
        #[arg(long)]
        emergency: Option<String>,
    },
    /// Delete a staff record.
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PaymentsAction {
    /// List payments (paginated).
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        /// Filter by status (paid, pending, failed)
        #[arg(long)]
        status: Option<String>,
        /// Filter by payment mode (cash, card, upi)
        #[arg(long)]
        mode: Option<String>,
    },
    /// Show one payment in full.
    Show { id: String },
    /// Revenue totals and per-status / per-mode breakdowns.
    Stats,
}

#[derive(Subcommand)]
enum ExpensesAction {
    /// List expenses (paginated).
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        category: Option<String>,
        /// Start date filter, YYYY-MM-DD
        #[arg(long)]
        from: Option<String>,
        /// End date filter, YYYY-MM-DD
        #[arg(long)]
        to: Option<String>,
    },
    /// Search by title, vendor, or reference.
    Search {
        query: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Expense totals, optionally over a date range.
    Stats {
        /// Start date, YYYY-MM-DD
        #[arg(long)]
        from: Option<String>,
        /// End date, YYYY-MM-DD
        #[arg(long)]
        to: Option<String>,
    },
    /// Record an expense.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        amount: f64,
        /// Category (maintenance, equipment, utilities, ...)
        #[arg(long)]
        category: String,
        /// Expense date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Payment method (cash, card, upi, bank)
        #[arg(long)]
        method: String,
        #[arg(long)]
        description: Option<String>,
        /// Vendor the expense was paid to
        #[arg(long)]
        vendor: Option<String>,
        /// Bill or invoice reference
        #[arg(long)]
        reference: Option<String>,
        /// Receipt image or document URL
        #[arg(long)]
        receipt: Option<String>,
    },
    /// Update an expense.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        category: Option<String>,
        /// Expense date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        method: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        vendor: Option<String>,
        #[arg(long)]
        reference: Option<String>,
        #[arg(long)]
        receipt: Option<String>,
    },
    /// Delete an expense.
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PlansAction {
    /// List all plans.
    List,
    /// Create a plan. The per-day rate is derived from price and days.
    Add {
        #[arg(long)]
        name: String,
        /// Plan length in days
        #[arg(long)]
        days: u32,
        /// Total price for the full duration
        #[arg(long)]
        price: f64,
    },
    /// Update a plan. Changing days or price recomputes the per-day rate.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        price: Option<f64>,
    },
    /// Delete a plan.
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ExercisesAction {
    /// List exercises (paginated).
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        /// Free-text name search
        #[arg(long)]
        search: Option<String>,
        /// Filter by difficulty (beginner, intermediate, expert)
        #[arg(long)]
        level: Option<Level>,
        /// Filter by category (strength, cardio, stretching, ...)
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one exercise in full, including instruction steps.
    Show { id: String },
    /// Add an exercise to the library.
    Add {
        /// Stable slug id, e.g. incline-bench-press
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Difficulty (beginner, intermediate, expert)
        #[arg(long)]
        level: Level,
        /// Primary muscle; repeat the flag for more than one
        #[arg(long = "muscle", required = true)]
        muscles: Vec<String>,
        /// Secondary muscle; repeatable
        #[arg(long = "secondary")]
        secondary: Vec<String>,
        /// Instruction step, in order; repeatable
        #[arg(long = "step")]
        steps: Vec<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        equipment: Option<String>,
        /// Force type (push, pull, static)
        #[arg(long)]
        force: Option<String>,
        /// Mechanic (compound, isolation)
        #[arg(long)]
        mechanic: Option<String>,
    },
    /// Delete an exercise.
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// List body parts.
    BodyParts,
    /// List the muscles of one body part.
    Muscles {
        /// Body part id from `exercises body-parts`
        body_part_id: i64,
    },
}

#[derive(Subcommand)]
enum AttendanceAction {
    /// List attendance records (paginated).
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        /// Start date filter, YYYY-MM-DD
        #[arg(long)]
        from: Option<String>,
        /// End date filter, YYYY-MM-DD
        #[arg(long)]
        to: Option<String>,
    },
    /// Search by member name, phone, or code.
    Search {
        query: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Stamp the check-out time on an open check-in.
    Checkout {
        id: String,
        /// Note to attach with the check-out
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an attendance record.
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AssignmentsAction {
    /// List trainer assignments (paginated).
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        /// Filter by status (Active, Completed, Cancelled)
        #[arg(long)]
        status: Option<AssignmentStatus>,
        /// Filter by trainer user id
        #[arg(long)]
        trainer: Option<String>,
        /// Filter by member id
        #[arg(long)]
        member: Option<String>,
    },
    /// Assign a trainer to a member.
    Assign {
        /// Member id
        #[arg(long)]
        member: String,
        /// Trainer user id
        #[arg(long)]
        trainer: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Mark an assignment completed.
    Complete { id: String },
    /// Cancel an assignment.
    Cancel { id: String },
    /// Assignment counts, including per-trainer load.
    Stats,
    /// List users holding the trainer role.
    Trainers,
}

#[derive(Subcommand)]
enum UsersAction {
    /// List user accounts (paginated).
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        /// Filter by phone or name fragment
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one user in full.
    Show { id: String },
    /// Create a user account.
    Add {
        /// Phone number (validated and normalized before sending)
        #[arg(long)]
        phone: String,
        /// Role id from `gymctl roles list`
        #[arg(long)]
        role: String,
    },
    /// Change a user's role or active flag.
    Update {
        id: String,
        /// New role id
        #[arg(long)]
        role: Option<String>,
        /// Activate (true) or deactivate (false) the account
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a user account.
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RolesAction {
    /// List roles.
    List,
    /// Create a role.
    Create {
        /// Role name, stored snake_case (e.g. front_desk)
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a role.
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PermissionsAction {
    /// Print the module × action grid for a role.
    Show {
        role_id: String,
        /// Print the flat granted permission codes as JSON
        #[arg(long)]
        json: bool,
    },
    /// Grant one module action.
    Grant {
        role_id: String,
        /// Module id or code (see `permissions show`)
        module: String,
        /// create, read, update, delete, or export
        action: CanonicalAction,
    },
    /// Revoke one module action.
    Revoke {
        role_id: String,
        /// Module id or code
        module: String,
        /// create, read, update, delete, or export
        action: CanonicalAction,
    },
    /// Select or clear a whole module row.
    ///
    /// Majority rule: if every action is granted the row is cleared,
    /// otherwise every action is granted.
    ToggleModule {
        role_id: String,
        /// Module id or code
        module: String,
    },
    /// Grant every permission in the grid.
    GrantAll {
        role_id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config first (it merges the TOML layer), then logging, once, before
    // any tracing calls.
    let config = ConsoleConfig::new(args.api_url, args.data_dir, args.log, args.log_file);
    let _file_guard = setup_logging(&config.log, config.log_file.as_deref(), &config.log_format);

    let console = Console::new(config)?;
    let quiet = args.quiet;

    match args.command {
        Command::Login { phone } => cli::login::cmd_login(&console, phone, quiet).await?,
        Command::Logout => cli::login::cmd_logout(&console).await?,
        Command::Whoami { json } => cli::login::cmd_whoami(&console, json).await?,

        Command::Members { action } => match action {
            MembersAction::List { page, limit } => {
                cli::members::cmd_list(&console, page, limit).await?
            }
            MembersAction::Search { query, page, limit } => {
                cli::members::cmd_search(&console, query, page, limit).await?
            }
            MembersAction::Show { id } => cli::members::cmd_show(&console, id).await?,
            MembersAction::Add {
                name,
                phone,
                days,
                mode,
                gender,
                dob,
                discount,
                reference,
            } => {
                let req = CreateMemberRequest {
                    mobile_number: phone,
                    full_name: name,
                    gender,
                    date_of_birth: dob,
                    duration_days: days,
                    discount_amount: discount,
                    payment_mode: mode,
                    reference_no: reference,
                };
                cli::members::cmd_add(&console, req).await?
            }
            MembersAction::Update {
                id,
                name,
                days,
                discount,
                status,
            } => {
                let req = UpdateMemberRequest {
                    full_name: name,
                    duration_days: days,
                    discount_amount: discount,
                    status,
                };
                cli::members::cmd_update(&console, id, req).await?
            }
            MembersAction::Remove { id, yes } => {
                cli::members::cmd_remove(&console, id, yes).await?
            }
        },

        Command::Staff { action } => match action {
            StaffAction::List { page, limit } => {
                cli::staff::cmd_list(&console, page, limit).await?
            }
            StaffAction::Search { query, page, limit } => {
                cli::staff::cmd_search(&console, query, page, limit).await?
            }
            StaffAction::Show { id } => cli::staff::cmd_show(&console, id).await?,
            StaffAction::Add {
                name,
                phone,
                role,
                designation,
                joined,
                salary,
                email,
                address,
                emergency,
            } => {
                let req = CreateStaffRequest {
                    full_name: name,
                    email,
                    phone_number: phone,
                    role,
                    designation,
                    date_of_joining: joined,
                    salary,
                    address,
                    emergency_contact: emergency,
                };
                cli::staff::cmd_add(&console, req).await?
            }
            StaffAction::Remove { id, yes } => cli::staff::cmd_remove(&console, id, yes).await?,
        },

        Command::Payments { action } => match action {
            PaymentsAction::List {
                page,
                limit,
                status,
                mode,
            } => cli::payments::cmd_list(&console, page, limit, status, mode).await?,
            PaymentsAction::Show { id } => cli::payments::cmd_show(&console, id).await?,
            PaymentsAction::Stats => cli::payments::cmd_stats(&console).await?,
        },

        Command::Expenses { action } => match action {
            ExpensesAction::List {
                page,
                limit,
                category,
                from,
                to,
            } => cli::expenses::cmd_list(&console, page, limit, category, from, to).await?,
            ExpensesAction::Search { query, page, limit } => {
                cli::expenses::cmd_search(&console, query, page, limit).await?
            }
            ExpensesAction::Stats { from, to } => {
                cli::expenses::cmd_stats(&console, from, to).await?
            }
            ExpensesAction::Add {
                title,
                amount,
                category,
                date,
                method,
                description,
                vendor,
                reference,
                receipt,
            } => {
                let req = CreateExpenseRequest {
                    title,
                    description,
                    amount,
                    category,
                    expense_date: date,
                    payment_method: method,
                    vendor_name: vendor,
                    reference_no: reference,
                    receipt_url: receipt,
                };
                cli::expenses::cmd_add(&console, req).await?
            }
            ExpensesAction::Update {
                id,
                title,
                amount,
                category,
                date,
                method,
                description,
                vendor,
                reference,
                receipt,
            } => {
                let req = UpdateExpenseRequest {
                    title,
                    description,
                    amount,
                    category,
                    expense_date: date,
                    payment_method: method,
                    vendor_name: vendor,
                    reference_no: reference,
                    receipt_url: receipt,
                };
                cli::expenses::cmd_update(&console, id, req).await?
            }
            ExpensesAction::Remove { id, yes } => {
                cli::expenses::cmd_remove(&console, id, yes).await?
            }
        },

        Command::Plans { action } => match action {
            PlansAction::List => cli::plans::cmd_list(&console).await?,
            PlansAction::Add { name, days, price } => {
                cli::plans::cmd_add(&console, name, days, price).await?
            }
            PlansAction::Update {
                id,
                name,
                days,
                price,
            } => cli::plans::cmd_update(&console, id, name, days, price).await?,
            PlansAction::Remove { id, yes } => cli::plans::cmd_remove(&console, id, yes).await?,
        },

        Command::Exercises { action } => match action {
            ExercisesAction::List {
                page,
                limit,
                search,
                level,
                category,
            } => cli::exercises::cmd_list(&console, page, limit, search, level, category).await?,
            ExercisesAction::Show { id } => cli::exercises::cmd_show(&console, id).await?,
            ExercisesAction::Add {
                id,
                name,
                level,
                muscles,
                secondary,
                steps,
                category,
                equipment,
                force,
                mechanic,
            } => {
                let req = CreateExerciseRequest {
                    id,
                    name,
                    level,
                    equipment,
                    primary_muscles: muscles,
                    secondary_muscles: if secondary.is_empty() {
                        None
                    } else {
                        Some(secondary)
                    },
                    instructions: if steps.is_empty() { None } else { Some(steps) },
                    category,
                    force,
                    mechanic,
                    images: None,
                };
                cli::exercises::cmd_add(&console, req).await?
            }
            ExercisesAction::Remove { id, yes } => {
                cli::exercises::cmd_remove(&console, id, yes).await?
            }
            ExercisesAction::BodyParts => cli::exercises::cmd_body_parts(&console).await?,
            ExercisesAction::Muscles { body_part_id } => {
                cli::exercises::cmd_muscles(&console, body_part_id).await?
            }
        },

        Command::Attendance { action } => match action {
            AttendanceAction::List {
                page,
                limit,
                from,
                to,
            } => cli::attendance::cmd_list(&console, page, limit, from, to).await?,
            AttendanceAction::Search { query, page, limit } => {
                cli::attendance::cmd_search(&console, query, page, limit).await?
            }
            AttendanceAction::Checkout { id, notes } => {
                cli::attendance::cmd_checkout(&console, id, notes).await?
            }
            AttendanceAction::Remove { id, yes } => {
                cli::attendance::cmd_remove(&console, id, yes).await?
            }
        },

        Command::Assignments { action } => match action {
            AssignmentsAction::List {
                page,
                limit,
                status,
                trainer,
                member,
            } => {
                cli::assignments::cmd_list(&console, page, limit, status, trainer, member).await?
            }
            AssignmentsAction::Assign {
                member,
                trainer,
                notes,
            } => cli::assignments::cmd_assign(&console, member, trainer, notes).await?,
            AssignmentsAction::Complete { id } => {
                cli::assignments::cmd_complete(&console, id).await?
            }
            AssignmentsAction::Cancel { id } => cli::assignments::cmd_cancel(&console, id).await?,
            AssignmentsAction::Stats => cli::assignments::cmd_stats(&console).await?,
            AssignmentsAction::Trainers => cli::assignments::cmd_trainers(&console).await?,
        },

        Command::Users { action } => match action {
            UsersAction::List {
                page,
                limit,
                search,
            } => cli::users::cmd_list(&console, page, limit, search).await?,
            UsersAction::Show { id } => cli::users::cmd_show(&console, id).await?,
            UsersAction::Add { phone, role } => cli::users::cmd_add(&console, phone, role).await?,
            UsersAction::Update { id, role, active } => {
                cli::users::cmd_update(&console, id, role, active).await?
            }
            UsersAction::Remove { id, yes } => cli::users::cmd_remove(&console, id, yes).await?,
        },

        Command::Roles { action } => match action {
            RolesAction::List => cli::roles::cmd_list(&console).await?,
            RolesAction::Create { name, description } => {
                cli::roles::cmd_create(&console, name, description).await?
            }
            RolesAction::Delete { id, yes } => cli::roles::cmd_delete(&console, id, yes).await?,
        },

        Command::Permissions { action } => match action {
            PermissionsAction::Show { role_id, json } => {
                cli::permissions::cmd_show(&console, role_id, json).await?
            }
            PermissionsAction::Grant {
                role_id,
                module,
                action,
            } => cli::permissions::cmd_grant(&console, role_id, module, action).await?,
            PermissionsAction::Revoke {
                role_id,
                module,
                action,
            } => cli::permissions::cmd_revoke(&console, role_id, module, action).await?,
            PermissionsAction::ToggleModule { role_id, module } => {
                cli::permissions::cmd_toggle_module(&console, role_id, module).await?
            }
            PermissionsAction::GrantAll { role_id, yes } => {
                cli::permissions::cmd_grant_all(&console, role_id, yes).await?
            }
        },
    }

    Ok(())
}

/// Initialize the tracing subscriber.
/// If `log_file` is set, logs go to both stderr and a daily-rolling file.
/// Returns a `WorkerGuard` that must stay alive for the process lifetime.
///
/// `log_format` may be `"pretty"` (default, human-readable compact format) or
/// `"json"` (structured JSON for log aggregators).
///
/// If the log directory cannot be created, falls back to stderr-only logging
/// with a warning rather than exiting.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
    log_format: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    // Tables and prompts own stdout; diagnostics go to stderr.
    let stderr_only = || {
        if use_json {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(log_level)
                .with_writer(std::io::stderr)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(log_level)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
    };

    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("gymctl.log"));

        // Ensure the directory exists before tracing-appender tries to open it.
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!(
                "warn: could not create log directory '{}': {e}; falling back to stderr",
                dir.display()
            );
            stderr_only();
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        if use_json {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .with(fmt::layer().with_writer(non_blocking))
                .init();
        }

        Some(guard)
    } else {
        stderr_only();
        None
    }
}
