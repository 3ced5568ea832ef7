//! 学科与学生兴趣存储操作

use super::SeaOrmStorage;
use crate::entity::student_interests::{
    ActiveModel as InterestActiveModel, Column as InterestColumn, Entity as StudentInterests,
};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{ClassroomError, Result};
use crate::models::subjects::Subject;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 按名称排序列出学科
    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询学科列表失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询学科失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn get_subject_by_name_impl(&self, name: &str) -> Result<Option<Subject>> {
        let result = Subjects::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询学科失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 创建学科
    pub async fn create_subject_impl(&self, name: &str, color: &str) -> Result<Subject> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            color: Set(color.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建学科失败: {e}")))?;

        Ok(result.into_subject())
    }

    /// 统计 ids 中存在的学科数量
    pub async fn count_subjects_in_impl(&self, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        Subjects::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("统计学科数量失败: {e}")))
    }

    /// 学生的兴趣学科，按名称排序
    pub async fn list_student_interests_impl(&self, student_id: i64) -> Result<Vec<Subject>> {
        let subject_ids: Vec<i64> = StudentInterests::find()
            .filter(InterestColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询兴趣学科失败: {e}")))?
            .into_iter()
            .map(|m| m.subject_id)
            .collect();

        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }

        let subjects = Subjects::find()
            .filter(Column::Id.is_in(subject_ids))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询学科列表失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 替换学生的兴趣学科（同一事务）
    pub async fn set_student_interests_impl(
        &self,
        student_id: i64,
        subject_ids: &[i64],
    ) -> Result<Vec<Subject>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassroomError::database_operation(format!("开启事务失败: {e}")))?;

        StudentInterests::delete_many()
            .filter(InterestColumn::StudentId.eq(student_id))
            .exec(&txn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("清除兴趣学科失败: {e}")))?;

        let mut seen = std::collections::HashSet::new();
        for subject_id in subject_ids.iter().filter(|id| seen.insert(**id)) {
            InterestActiveModel {
                student_id: Set(student_id),
                subject_id: Set(*subject_id),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("写入兴趣学科失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| ClassroomError::database_operation(format!("提交事务失败: {e}")))?;

        self.list_student_interests_impl(student_id).await
    }
}
