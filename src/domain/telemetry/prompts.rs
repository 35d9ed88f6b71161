//! 提示词模板
//!
//! 把口语问题包装成 KQL 生成提示词，以及把查询结果包装成回复生成提示词

use super::ScalarValue;

/// 风机遥测表名
pub const TELEMETRY_TABLE: &str = "newtablwithmoredays";

/// 允许模型使用的列
pub const TELEMETRY_COLUMNS: &[&str] = &[
    "Timestamp",
    "Gen_RPM",
    "Gen_Bear_Temp",
    "Gen_Phase1_Temp",
    "Gen_Phase2_Temp",
    "Gen_Phase3_Temp",
    "Gear_Oil_Temp",
    "Gear_Bear_Temp",
    "Nac_Temp",
    "Rtr_RPM",
    "Amb_WindDir",
    "Amb_Temp",
    "Prod_TotActPwr",
    "Prod_TotReactPwr",
    "Gen_SlipRing_Temp",
    "Blds_PitchAngle",
    "Grid_Prod_Pwr",
    "Grid_CosPhi",
    "Grid_Prod_Freq",
    "Grid_Prod_VoltPhse1",
    "Grid_Prod_VoltPhse2",
    "Grid_Prod_VoltPhse3",
    "Grid_Busbar_Temp",
    "Gen_Bear2_Temp",
    "Nac_Direction",
    "Predicted_TotActPwr",
];

/// 构建 KQL 生成提示词
pub fn build_kql_prompt(spoken_text: &str) -> String {
    let t = TELEMETRY_TABLE;
    let columns = TELEMETRY_COLUMNS.join(", ");
    let latest = format!("let latestDate = toscalar({t} | summarize max(Timestamp)); {t}");

    format!(
        r#"
You are a Kusto Query Language (KQL) expert for Azure Data Explorer. Return only a valid KQL query for the table `{t}`.

The table columns:
{columns}.

INSTRUCTIONS:
- If the user asks for **average, sum, or count**, use `print` and `toscalar(...)`.
- Wind speed corresponds to Gen_RPM.
- For the **latest or current value**, use:
    `{t} | top 1 by Timestamp desc | project column = ColumnName`
- For a **specific absolute date**, use:
    `{t} | where Timestamp == datetime(YYYY-MM-DD HH:mm:ss) | project ...`
- If the user asks for **"yesterday"**, interpret it as the latest available date minus 1 day, using:
    `{latest} | where Timestamp between (startofday(latestDate - 1d) .. endofday(latestDate - 1d)) | summarize ...`
- If the user asks for **"two days ago"**, use:
    `{latest} | where Timestamp between (startofday(latestDate - 2d) .. endofday(latestDate - 2d)) | summarize ...`
- For **date ranges like "last 3 days"**, use:
    `{latest} | where Timestamp between (latestDate - 3d) .. latestDate | summarize ...`
- Do **not** use SQL keywords like SELECT, FROM, or GROUP BY.
- Use only the provided column names.
- Always return **only the KQL query without explanation or extra text**.

Examples:
print avg_temp = toscalar({t} | summarize avg(Amb_Temp))
{t} | top 1 by Timestamp desc | project GenRPM = Gen_RPM
{latest} | where Timestamp between (startofday(latestDate - 1d) .. endofday(latestDate - 1d)) | summarize avgTemp = avg(Amb_Temp)

User input: "{spoken_text}"
"#
    )
}

/// 构建结果播报提示词
///
/// 空结果以字面量 `None` 交给模型描述
pub fn build_summary_prompt(spoken_text: &str, value: Option<&ScalarValue>) -> String {
    let value = value
        .map(ToString::to_string)
        .unwrap_or_else(|| "None".to_string());
    format!(
        "The user asked: \"{}\"\nThe result is: \"{}\"\nGenerate a short, voice assistant-style reply.",
        spoken_text, value
    )
}
