use std::io::Write;

use anyhow::Result;

use crate::generators::{AutomationScript, GenerationError, TestCaseDocument, TestDataArtifact};

pub fn test_case<W: Write>(out: &mut W, doc: &TestCaseDocument) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "## 📝 Test Case")?;
    writeln!(out)?;
    writeln!(out, "{}", doc.as_str().trim_end())?;
    writeln!(out)?;
    Ok(())
}

pub fn test_data<W: Write>(out: &mut W, artifact: &TestDataArtifact) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "## 📊 Test Data")?;
    writeln!(out)?;
    writeln!(out, "{}", artifact.as_str().trim_end())?;
    writeln!(out)?;
    Ok(())
}

pub fn script<W: Write>(out: &mut W, script: &AutomationScript, fence_tag: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "## 🤖 Automation Script")?;
    writeln!(out)?;
    if script.is_degraded() {
        writeln!(
            out,
            "⚠️  No `{}` code block found in the reply, showing the raw response.",
            fence_tag
        )?;
        writeln!(out)?;
        writeln!(out, "{}", script.text.trim_end())?;
    } else {
        writeln!(out, "```{}", fence_tag)?;
        writeln!(out, "{}", script.text)?;
        writeln!(out, "```")?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn failure<W: Write>(out: &mut W, err: &GenerationError) -> Result<()> {
    match err {
        GenerationError::InputInvalid(reason) => writeln!(out, "❌ {}", reason)?,
        GenerationError::GenerationFailed(_) => writeln!(out, "❌ {}", err)?,
    }
    Ok(())
}
