//! Fixed analytical report queries over the loaded hiring data.
//!
//! Both reports are opaque SQL delegated to MySQL; no aggregation happens in
//! Rust. The report year is fixed to 2021, the year covered by the data set.

use mysql_async::prelude::*;
use serde::Serialize;

use crate::db::DbPool;
use crate::error::Result;

/// Hire counts for one department/job pairing, split by calendar quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuarterlyHires {
    pub department: String,
    pub job: String,
    #[serde(rename = "Q1")]
    pub q1: i64,
    #[serde(rename = "Q2")]
    pub q2: i64,
    #[serde(rename = "Q3")]
    pub q3: i64,
    #[serde(rename = "Q4")]
    pub q4: i64,
}

/// A department whose hire count exceeds the cross-department mean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentHires {
    pub id: i64,
    pub department: String,
    pub hired: i64,
}

const HIRED_BY_QUARTER_SQL: &str = "\
SELECT d.department,
       j.job,
       COUNT(CASE WHEN QUARTER(e.hire_datetime) = 1 THEN 1 END) AS q1,
       COUNT(CASE WHEN QUARTER(e.hire_datetime) = 2 THEN 1 END) AS q2,
       COUNT(CASE WHEN QUARTER(e.hire_datetime) = 3 THEN 1 END) AS q3,
       COUNT(CASE WHEN QUARTER(e.hire_datetime) = 4 THEN 1 END) AS q4
FROM employees e
JOIN departments d ON d.id = e.department_id
JOIN jobs j ON j.id = e.job_id
WHERE YEAR(e.hire_datetime) = 2021
GROUP BY d.department, j.job
ORDER BY d.department, j.job";

const DEPARTMENTS_ABOVE_MEAN_SQL: &str = "\
SELECT d.id, d.department, COUNT(e.id) AS hired
FROM departments d
JOIN employees e ON e.department_id = d.id
WHERE YEAR(e.hire_datetime) = 2021
GROUP BY d.id, d.department
HAVING COUNT(e.id) > (
    SELECT AVG(per_department.hired) FROM (
        SELECT COUNT(e2.id) AS hired
        FROM employees e2
        WHERE YEAR(e2.hire_datetime) = 2021
        GROUP BY e2.department_id
    ) AS per_department
)
ORDER BY hired DESC";

/// 2021 hires per department/job pairing by calendar quarter, ordered by
/// department then job.
pub async fn hired_by_quarter(pool: &DbPool) -> Result<Vec<QuarterlyHires>> {
    let mut conn = pool.get_conn("running hired-by-quarter report").await?;

    let rows = conn
        .query_map(
            HIRED_BY_QUARTER_SQL,
            |(department, job, q1, q2, q3, q4)| QuarterlyHires {
                department,
                job,
                q1,
                q2,
                q3,
                q4,
            },
        )
        .await?;

    Ok(rows)
}

/// Departments whose 2021 hire count exceeds the mean across departments,
/// ordered by hire count descending.
pub async fn departments_above_mean(pool: &DbPool) -> Result<Vec<DepartmentHires>> {
    let mut conn = pool.get_conn("running above-mean-hiring report").await?;

    let rows = conn
        .query_map(
            DEPARTMENTS_ABOVE_MEAN_SQL,
            |(id, department, hired)| DepartmentHires {
                id,
                department,
                hired,
            },
        )
        .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarterly_hires_serializes_with_quarter_keys() {
        let row = QuarterlyHires {
            department: "HR".into(),
            job: "Manager".into(),
            q1: 1,
            q2: 2,
            q3: 0,
            q4: 3,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["department"], "HR");
        assert_eq!(json["job"], "Manager");
        assert_eq!(json["Q1"], 1);
        assert_eq!(json["Q4"], 3);
        // Lowercase keys must not leak into the response body.
        assert!(json.get("q1").is_none());
    }

    #[test]
    fn test_department_hires_serializes_flat() {
        let row = DepartmentHires {
            id: 7,
            department: "IT".into(),
            hired: 15,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["department"], "IT");
        assert_eq!(json["hired"], 15);
    }

    #[test]
    fn test_report_queries_filter_fixed_year() {
        assert!(HIRED_BY_QUARTER_SQL.contains("YEAR(e.hire_datetime) = 2021"));
        assert!(DEPARTMENTS_ABOVE_MEAN_SQL.contains("YEAR(e.hire_datetime) = 2021"));
        assert!(DEPARTMENTS_ABOVE_MEAN_SQL.contains("ORDER BY hired DESC"));
    }
}
