//! 小组存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::quizzes::{Column as QuizColumn, Entity as Quizzes};
use crate::entity::team_members::{
    ActiveModel as MemberActiveModel, Column as MemberColumn, Entity as TeamMembers,
};
use crate::entity::teams::{ActiveModel, Column, Entity as Teams};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    teams::{Team, entities::TeamListItem},
    users::UserSummary,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 列出小组（按名称），附带测验名和成员数
    pub async fn list_teams_impl(&self, owner_id: Option<i64>) -> Result<Vec<TeamListItem>> {
        let mut quiz_select = Quizzes::find();
        if let Some(owner_id) = owner_id {
            quiz_select = quiz_select.filter(QuizColumn::OwnerId.eq(owner_id));
        }
        let quiz_names: HashMap<i64, String> = quiz_select
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询测验失败: {e}")))?
            .into_iter()
            .map(|q| (q.id, q.name))
            .collect();

        if quiz_names.is_empty() {
            return Ok(Vec::new());
        }

        let teams = Teams::find()
            .filter(Column::QuizId.is_in(quiz_names.keys().copied()))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询小组列表失败: {e}")))?;

        let team_ids: Vec<i64> = teams.iter().map(|t| t.id).collect();
        let member_counts: HashMap<i64, i64> = if team_ids.is_empty() {
            HashMap::new()
        } else {
            TeamMembers::find()
                .select_only()
                .column(MemberColumn::TeamId)
                .column_as(MemberColumn::Id.count(), "count")
                .filter(MemberColumn::TeamId.is_in(team_ids))
                .group_by(MemberColumn::TeamId)
                .into_tuple::<(i64, i64)>()
                .all(&self.db)
                .await
                .map_err(|e| ClassroomError::database_operation(format!("统计小组成员失败: {e}")))?
                .into_iter()
                .collect()
        };

        Ok(teams
            .into_iter()
            .map(|t| TeamListItem {
                quiz_name: quiz_names.get(&t.quiz_id).cloned().unwrap_or_default(),
                students_count: member_counts.get(&t.id).copied().unwrap_or(0),
                team: t.into_team(),
            })
            .collect())
    }

    /// 在一个事务内创建小组及其成员
    pub async fn create_team_impl(
        &self,
        name: &str,
        quiz_id: i64,
        student_ids: &[i64],
    ) -> Result<Team> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassroomError::database_operation(format!("开启事务失败: {e}")))?;

        // 一个学生在同一测验下只能属于一个小组
        for student_id in student_ids {
            if Self::find_student_team(&txn, *student_id, quiz_id)
                .await?
                .is_some()
            {
                return Err(ClassroomError::validation(
                    "A student can only be in one team per quiz.",
                ));
            }
        }

        let team = ActiveModel {
            name: Set(name.to_string()),
            quiz_id: Set(quiz_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ClassroomError::database_operation(format!("创建小组失败: {e}")))?;

        for student_id in student_ids {
            MemberActiveModel {
                team_id: Set(team.id),
                student_id: Set(*student_id),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("添加小组成员失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| ClassroomError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(team.into_team())
    }

    pub async fn get_team_by_id_impl(&self, team_id: i64) -> Result<Option<Team>> {
        let result = Teams::find_by_id(team_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询小组失败: {e}")))?;

        Ok(result.map(|m| m.into_team()))
    }

    /// 小组成员，按用户名排序
    pub async fn list_team_members_impl(&self, team_id: i64) -> Result<Vec<UserSummary>> {
        let student_ids: Vec<i64> = TeamMembers::find()
            .filter(MemberColumn::TeamId.eq(team_id))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询小组成员失败: {e}")))?
            .into_iter()
            .map(|m| m.student_id)
            .collect();

        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .order_by_asc(UserColumn::Username)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询小组成员失败: {e}")))?;

        Ok(users.into_iter().map(|u| u.into_summary()).collect())
    }

    pub async fn delete_team_impl(&self, team_id: i64) -> Result<bool> {
        let result = Teams::delete_by_id(team_id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("删除小组失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生在某个测验下所属的小组
    pub(super) async fn find_student_team<C: ConnectionTrait>(
        conn: &C,
        student_id: i64,
        quiz_id: i64,
    ) -> Result<Option<i64>> {
        let team_ids: Vec<i64> = Teams::find()
            .filter(Column::QuizId.eq(quiz_id))
            .all(conn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询小组失败: {e}")))?
            .into_iter()
            .map(|t| t.id)
            .collect();

        if team_ids.is_empty() {
            return Ok(None);
        }

        let membership = TeamMembers::find()
            .filter(MemberColumn::StudentId.eq(student_id))
            .filter(MemberColumn::TeamId.is_in(team_ids))
            .one(conn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询小组成员失败: {e}")))?;

        Ok(membership.map(|m| m.team_id))
    }
}
