// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn report_filters(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("search")
            .long("search")
            .short('s')
            .help("Case-insensitive text to match"),
    )
    .arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD"))
    .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD"))
}

fn amount_arg(id: &'static str, help: &'static str, required: bool) -> Arg {
    Arg::new(id).long(id).required(required).help(help)
}

fn revenue_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("client")
            .long("client")
            .required(required)
            .help("Client name"),
    )
    .arg(
        Arg::new("type")
            .long("type")
            .required(required)
            .help("Visa|Umrah|Work Contract|Hajj"),
    )
    .arg(amount_arg("contract", "Contract price", required))
    .arg(amount_arg("offer", "Offer price", required))
    .arg(amount_arg("paid", "Paid amount", required))
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(clap::value_parser!(i64))
        .help("Revenue record id")
}

pub fn build_cli() -> Command {
    Command::new("agencydesk")
        .version(crate_version!())
        .about("Revenue, expense and customer dashboard for visa and Umrah agencies")
        .arg(
            Arg::new("api_url")
                .long("api-url")
                .global(true)
                .help("Backend base URL (overrides config)"),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .global(true)
                .help("Display language: en|ar"),
        )
        .arg(
            Arg::new("offline_fallback")
                .long("offline-fallback")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Serve fixture data when the backend is unavailable"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("login")
                .about("Log in and store the session")
                .arg(
                    Arg::new("username")
                        .long("username")
                        .short('u')
                        .required_unless_present("demo"),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .short('p')
                        .required_unless_present("demo"),
                )
                .arg(Arg::new("role").long("role").help("Admin|User"))
                .arg(
                    Arg::new("demo")
                        .long("demo")
                        .action(ArgAction::SetTrue)
                        .help("Start an offline demo session backed by fixture data"),
                ),
        )
        .subcommand(Command::new("logout").about("Clear the stored session"))
        .subcommand(Command::new("whoami").about("Show the logged-in profile"))
        .subcommand(
            Command::new("revenue")
                .about("Client revenues")
                .subcommand_required(true)
                .subcommand(revenue_fields(
                    Command::new("add").about("Record a client contract"),
                    true,
                ))
                .subcommand(revenue_fields(
                    Command::new("edit")
                        .about("Change fields of a record; unset fields keep their value")
                        .arg(id_arg()),
                    false,
                ))
                .subcommand(Command::new("show").arg(id_arg()))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(json_flags(report_filters(
                    Command::new("list").about("Revenues grouped by month"),
                )))
                .subcommand(
                    Command::new("calc")
                        .about("Preview revenue and rest for a contract")
                        .arg(amount_arg("contract", "Contract price", false))
                        .arg(amount_arg("offer", "Offer price", false))
                        .arg(amount_arg("paid", "Paid amount", false)),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Operating expenses")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("Expense category, e.g. Salaries"),
                        )
                        .arg(amount_arg("amount", "Amount", true))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(report_filters(
                    Command::new("list").about("Expenses grouped by month"),
                ))),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Dashboard totals")
                .arg(Arg::new("html").long("html").help("Write HTML to this file")),
        ))
        .subcommand(
            Command::new("customer")
                .about("Customer ledgers")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("search")
                        .arg(Arg::new("query").long("query").short('q').required(true)),
                ))
                .subcommand(json_flags(
                    Command::new("show")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("html").long("html").help("Write HTML to this file")),
                )),
        )
        .subcommand(
            Command::new("user")
                .about("User management")
                .subcommand_required(true)
                .subcommand(
                    Command::new("create")
                        .arg(Arg::new("username").long("username").required(true))
                        .arg(Arg::new("password").long("password").required(true))
                        .arg(
                            Arg::new("role")
                                .long("role")
                                .default_value("User")
                                .help("Admin|User"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export records")
                .subcommand_required(true)
                .subcommand(export_cmd("revenues"))
                .subcommand(export_cmd("expenses")),
        )
        .subcommand(report_filters(
            Command::new("dashboard")
                .about("Write the dashboard as a standalone HTML page")
                .arg(Arg::new("out").long("out").required(true)),
        ))
        .subcommand(
            Command::new("config")
                .about("Persisted settings")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(Command::new("set-api-url").arg(Arg::new("url").required(true)))
                .subcommand(Command::new("set-lang").arg(Arg::new("code").required(true)))
                .subcommand(
                    Command::new("set-fallback").arg(
                        Arg::new("state")
                            .required(true)
                            .value_parser(["on", "off"]),
                    ),
                ),
        )
}

fn export_cmd(name: &'static str) -> Command {
    report_filters(
        Command::new(name)
            .arg(
                Arg::new("format")
                    .long("format")
                    .default_value("csv")
                    .help("csv|json"),
            )
            .arg(Arg::new("out").long("out").required(true)),
    )
}
