// Basic usage example for cfgitem
//
// Run with: RUST_LOG=debug cargo run --example basic_usage

use cfgitem::{ConfigurationItem, Datatype, UpdateOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("cfgitem Basic Usage Example\n");

    let mut items = vec![
        ConfigurationItem::builder(Datatype::Bool)
            .key("DISABLEIPV6")
            .default_value(false)
            .instructions("Set to yes to disable IPv6 networking.")
            .simple(true)
            .build()?,
        ConfigurationItem::builder(Datatype::Int)
            .key("MAXAUTHTRIES")
            .valid_values([3i64, 4, 5, 6])
            .default_value(4i64)
            .instructions("Maximum SSH authentication attempts per connection.")
            .build()?,
        ConfigurationItem::builder(Datatype::String)
            .key("SYSLOGHOST")
            .regex_pattern(r"^[a-z0-9.-]+$")
            .default_value("localhost")
            .instructions("Host name of the central syslog server.")
            .build()?,
        ConfigurationItem::builder(Datatype::List)
            .key("ENABLEDSERVICES")
            .valid_values(["sshd", "ntpd", "crond", "cups"])
            .max_num_selections(4)
            .default_value(vec!["sshd", "crond"])
            .instructions("Comma separated services to keep enabled.")
            .build()?,
    ];

    // Raw values as they might come from a config file
    let incoming = [
        ("DISABLEIPV6", "Yes"),
        ("MAXAUTHTRIES", "10"),
        ("SYSLOGHOST", "logs.example.org"),
        ("ENABLEDSERVICES", "sshd,ntpd,telnetd"),
    ];
    let options = UpdateOptions::new();
    let comma = UpdateOptions::new().list_delim(",");

    for (key, raw) in incoming {
        let Some(ci) = items.iter_mut().find(|ci| ci.key() == key) else {
            continue;
        };
        let opts = if ci.datatype() == Datatype::List {
            &comma
        } else {
            &options
        };

        if ci.update_curr_value_with(raw, opts) {
            println!("   Accepted {key} = {}", ci.curr_value());
        } else {
            println!("   Rejected {key} = {raw:?}, keeping {}", ci.curr_value());
        }
    }

    println!("\nSimple view:");
    for ci in items.iter().filter(|ci| ci.in_simple()) {
        println!("   # {}", ci.instructions());
        println!("   {} = {}", ci.key(), ci.curr_value());
    }

    println!("\nDefinition of MAXAUTHTRIES:");
    if let Some(ci) = items.iter().find(|ci| ci.key() == "MAXAUTHTRIES") {
        println!("{}", ci.to_json()?);
    }

    Ok(())
}
