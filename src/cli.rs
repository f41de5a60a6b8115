// Copyright (c) 2025 Solarledger.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("solarledger")
        .about("Solar-installation CRM: clients, crews, projects, fleet, and bookkeeping")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("client")
                .about("Manage client companies")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("rate")
                                .long("rate")
                                .required(true)
                                .help("Rate per installed watt"),
                        )
                        .arg(Arg::new("contact").long("contact")),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include deactivated clients"),
                    ),
                ))
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("staff")
                .about("Manage installation crew")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("role").long("role").required(true))
                        .arg(
                            Arg::new("pay-type")
                                .long("pay-type")
                                .required(true)
                                .help("per_panel or per_project"),
                        )
                        .arg(Arg::new("rate").long("rate").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include deactivated staff"),
                    ),
                ))
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("project")
                .about("Track installation projects")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("client").long("client").required(true))
                        .arg(Arg::new("site").long("site").required(true))
                        .arg(
                            Arg::new("panel-watt")
                                .long("panel-watt")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("panel-qty")
                                .long("panel-qty")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("inverter-model").long("inverter-model"))
                        .arg(
                            Arg::new("inverter-qty")
                                .long("inverter-qty")
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("status").long("status").help("Filter by status")),
                ))
                .subcommand(
                    Command::new("assign")
                        .about("Put a crew member on a project and compute their pay")
                        .arg(
                            Arg::new("project")
                                .long("project")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("staff").long("staff").required(true))
                        .arg(
                            Arg::new("role")
                                .long("role")
                                .required(true)
                                .help("leader, installer, or electrician"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("crew").arg(
                        Arg::new("project")
                            .long("project")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ))
                .subcommand(
                    Command::new("start")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("Installation date, defaults to today"),
                        ),
                )
                .subcommand(
                    Command::new("complete")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("Completion date, defaults to today"),
                        ),
                )
                .subcommand(
                    Command::new("file")
                        .about("Attachment metadata for a project")
                        .subcommand(
                            Command::new("add")
                                .arg(
                                    Arg::new("project")
                                        .long("project")
                                        .required(true)
                                        .value_parser(value_parser!(i64)),
                                )
                                .arg(Arg::new("path").required(true))
                                .arg(Arg::new("label").long("label")),
                        )
                        .subcommand(
                            Command::new("list").arg(
                                Arg::new("project")
                                    .long("project")
                                    .required(true)
                                    .value_parser(value_parser!(i64)),
                            ),
                        ),
                ),
        )
        .subcommand(
            Command::new("vehicle")
                .about("Manage the vehicle fleet")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("plate").long("plate").required(true))
                        .arg(Arg::new("model").long("model")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(Arg::new("plate").required(true))),
        )
        .subcommand(
            Command::new("asset")
                .about("Track company assets")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("date").long("date").help("Purchase date"))
                        .arg(Arg::new("price").long("price"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("finance")
                .about("Bookkeeping: manual records and period summaries")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("vehicle").long("vehicle").help("Vehicle plate"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
                )
                .subcommand(json_flags(
                    Command::new("summary")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .value_parser(value_parser!(u32)),
                        ),
                )),
        )
        .subcommand(
            Command::new("recurring")
                .about("Recurring expense definitions and processing")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .required(true)
                                .help("weekly, monthly, or yearly"),
                        )
                        .arg(Arg::new("start").long("start").required(true))
                        .arg(Arg::new("end").long("end"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("enable").arg(Arg::new("name").required(true)))
                .subcommand(Command::new("disable").arg(Arg::new("name").required(true)))
                .subcommand(json_flags(
                    Command::new("process").arg(
                        Arg::new("today")
                            .long("today")
                            .help("Process as of this date instead of today"),
                    ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export data to files")
                .subcommand(
                    Command::new("finance")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the database for inconsistencies"))
}
