use std::io::{self, Write};

use kafka_admin::{ConsumerGroupListing, ListConsumerGroupsResult};

pub const BROKER_VERSION_NOTICE: &str = "The response values depends on the broker version in use, if the broker version does not support a feature or option, it will be ignored";

pub fn print_notice(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{BROKER_VERSION_NOTICE}")
}

fn print_group(out: &mut impl Write, group: &ConsumerGroupListing) -> io::Result<()> {
    writeln!(out, "GroupId: {}", group.group_id)?;
    writeln!(out, "State: {}", group.state)?;
    writeln!(out, "Group Type: {}", group.group_type)?;
    writeln!(out, "IsSimpleConsumerGroup: {}", group.is_simple_consumer_group)?;
    writeln!(out)
}

/// Prints every listed group, then the per-group errors if there are any.
pub fn print_result(out: &mut impl Write, result: &ListConsumerGroupsResult) -> io::Result<()> {
    writeln!(
        out,
        "A total of {} consumer group(s) listed:",
        result.valid.len()
    )?;
    for group in &result.valid {
        print_group(out, group)?;
    }

    if result.errors.is_empty() {
        return Ok(());
    }

    writeln!(
        out,
        "A total of {} error(s) while listing:",
        result.errors.len()
    )?;
    for err in &result.errors {
        writeln!(out, "{err}")?;
    }
    Ok(())
}
